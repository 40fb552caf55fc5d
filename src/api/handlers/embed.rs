//! Landing document carrying the `fc:miniapp` embed metadata. Farcaster
//! clients read the meta tag to render the launch card for the app URL.

use crate::api::AppState;
use axum::{extract::Extension, response::Html};
use serde::Serialize;
use tracing::error;

pub const DEFAULT_TITLE: &str = "Farcaster Mini App";
pub const DEFAULT_DESCRIPTION: &str = "A minimal Farcaster Mini App with Sign In with Farcaster";
pub const DEFAULT_BUTTON_TITLE: &str = "Open";
pub const DEFAULT_DOMAIN: &str = "localhost:8080";

/// Public app metadata; values end up in HTML, never store secrets here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbedConfig {
    pub domain: String,
    pub title: String,
    pub description: String,
    pub button_title: String,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            button_title: DEFAULT_BUTTON_TITLE.to_string(),
        }
    }
}

#[derive(Serialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MiniAppEmbed {
    pub version: String,
    pub image_url: String,
    pub button: EmbedButton,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct EmbedButton {
    pub title: String,
    pub action: EmbedAction,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct EmbedAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub url: String,
}

impl EmbedConfig {
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("https://{}", self.domain)
    }

    #[must_use]
    pub fn embed(&self) -> MiniAppEmbed {
        let base_url = self.base_url();

        MiniAppEmbed {
            version: "1".to_string(),
            image_url: format!("{base_url}/embed-preview.png"),
            button: EmbedButton {
                title: self.button_title.clone(),
                action: EmbedAction {
                    kind: "launch_miniapp".to_string(),
                    name: self.title.clone(),
                    url: format!("{base_url}/"),
                },
            },
        }
    }

    /// Renders the landing document with title, description and embed meta tag.
    #[must_use]
    pub fn render(&self) -> String {
        let embed = match serde_json::to_string(&self.embed()) {
            Ok(json) => json,
            Err(e) => {
                error!("Error encoding mini app embed: {}", e);
                String::new()
            }
        };

        format!(
            "<!doctype html>\n<html lang=\"en\">\n<head>\n\
             <meta charset=\"utf-8\">\n\
             <title>{title}</title>\n\
             <meta name=\"description\" content=\"{description}\">\n\
             <meta name=\"fc:miniapp\" content=\"{embed}\">\n\
             </head>\n<body>\n<h1>{title}</h1>\n<p>{description}</p>\n</body>\n</html>\n",
            title = escape(&self.title),
            description = escape(&self.description),
            embed = escape(&embed),
        )
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// axum handler for /
pub async fn root(state: Extension<AppState>) -> Html<String> {
    Html(state.embed.render())
}
