use crate::{
    api::AppState,
    neynar::{NeynarError, NeynarMe},
};
use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MeQuery {
    /// Farcaster id to look up
    fid: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct MeResponse {
    ok: bool,
    data: NeynarMe,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

fn parse_fid(raw: Option<&str>) -> Option<u64> {
    raw.map(str::trim)
        .filter(|fid| !fid.is_empty())
        .and_then(|fid| fid.parse::<u64>().ok())
}

#[utoipa::path(
    get,
    path= "/api/neynar/me",
    params(MeQuery),
    responses (
        (status = 200, description = "Profile and recent following-feed casts", body = MeResponse),
        (status = 400, description = "Invalid or missing fid parameter", body = ErrorBody),
        (status = 404, description = "No user with this fid", body = ErrorBody),
        (status = 500, description = "Failed to fetch user data", body = ErrorBody),
    ),
    tag= "neynar"
)]
// axum handler for /api/neynar/me
#[instrument(skip(state))]
pub async fn me(state: Extension<AppState>, query: Query<MeQuery>) -> Response {
    let Some(fid) = parse_fid(query.fid.as_deref()) else {
        debug!("rejecting fid: {:?}", query.fid);
        return error_response(StatusCode::BAD_REQUEST, "Invalid or missing fid parameter");
    };

    let Some(client) = state.neynar.as_ref() else {
        error!("Neynar API error: {}", NeynarError::MissingApiKey);
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch user data");
    };

    match client.fetch_user_and_casts(fid).await {
        Ok(data) => (StatusCode::OK, Json(MeResponse { ok: true, data })).into_response(),

        Err(NeynarError::UserNotFound(fid)) => {
            debug!("no Neynar user for fid {}", fid);
            error_response(StatusCode::NOT_FOUND, "User not found")
        }

        Err(e) => {
            error!("Neynar API error: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch user data")
        }
    }
}
