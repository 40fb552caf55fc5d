use crate::api::handlers::{health, neynar_me};
use utoipa::{
    openapi::{InfoBuilder, License},
    OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    paths(health::health, neynar_me::me),
    tags(
        (name = "health", description = "Service health"),
        (name = "neynar", description = "Read-only Farcaster profile lookups"),
    )
)]
struct ApiDoc;

/// `OpenAPI` document served at `/openapi.json`, with Cargo metadata as info.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();

    let mut info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(optional_str(env!("CARGO_PKG_DESCRIPTION")))
        .build();

    info.license = optional_str(env!("CARGO_PKG_LICENSE")).map(|identifier| {
        let mut license = License::new(identifier);
        license.identifier = Some(identifier.to_string());
        license
    });

    doc.info = info;
    doc
}

fn optional_str(value: &'static str) -> Option<&'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
