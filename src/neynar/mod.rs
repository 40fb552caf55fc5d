//! Read-only Neynar lookups backing the profile route: one bulk-user call and
//! one following-feed call per request. The API key is attached as a header
//! and never logged.

pub mod types;

pub use types::{NeynarMe, RecentCast};

use crate::APP_USER_AGENT;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};
use types::{BulkUsersResponse, FeedResponse};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.neynar.com";

/// Number of casts requested from the following feed.
pub const FEED_LIMIT: u32 = 10;

#[derive(Debug, Error)]
pub enum NeynarError {
    #[error("NEYNAR_API_KEY is not set")]
    MissingApiKey,
    #[error("no user found for fid {0}")]
    UserNotFound(u64),
    #[error("Neynar 401 Unauthorized: the API key is invalid or lacks permission for this endpoint")]
    Unauthorized,
    #[error("Neynar API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Neynar request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid Neynar URL: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Debug, Clone)]
pub struct NeynarClient {
    http: Client,
    base_url: Url,
    api_key: SecretString,
}

impl NeynarClient {
    /// Builds a client for the given API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or empty, the base URL does
    /// not parse, or the HTTP client cannot be built.
    pub fn new(api_key: Option<SecretString>, base_url: &str) -> Result<Self, NeynarError> {
        let api_key = api_key
            .filter(|key| !key.expose_secret().trim().is_empty())
            .ok_or(NeynarError::MissingApiKey)?;

        let http = Client::builder().user_agent(APP_USER_AGENT).build()?;

        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            api_key,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches the profile for `fid` together with its latest following-feed casts.
    ///
    /// # Errors
    ///
    /// Returns an error if either request fails or Neynar knows no such user.
    #[instrument(skip(self))]
    pub async fn fetch_user_and_casts(&self, fid: u64) -> Result<NeynarMe, NeynarError> {
        let users: BulkUsersResponse = self
            .get("/v2/farcaster/user/bulk", &[("fids", fid.to_string())])
            .await?;

        let user = users
            .users
            .into_iter()
            .next()
            .ok_or(NeynarError::UserNotFound(fid))?;

        let feed: FeedResponse = self
            .get(
                "/v2/farcaster/feed",
                &[
                    ("feed_type", "following".to_string()),
                    ("fid", fid.to_string()),
                    ("limit", FEED_LIMIT.to_string()),
                ],
            )
            .await?;

        debug!("fetched {} casts for fid {}", feed.casts.len(), fid);

        Ok(NeynarMe::from_parts(user, feed.casts))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, NeynarError> {
        let url = self.base_url.join(path)?;

        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .header("x-api-key", self.api_key.expose_secret())
            .query(query)
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(NeynarError::Unauthorized);
        }

        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or_default();

            return Err(NeynarError::Api {
                status: status.as_u16(),
                message: body["message"].as_str().unwrap_or("").to_string(),
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::{
        extract::Query,
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::get,
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    pub(crate) const TEST_API_KEY: &str = "test-key";

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == TEST_API_KEY)
    }

    async fn bulk(
        headers: HeaderMap,
        Query(query): Query<HashMap<String, String>>,
    ) -> impl IntoResponse {
        if !authorized(&headers) {
            return (StatusCode::UNAUTHORIZED, Json(json!({"message": "bad key"})));
        }

        match query.get("fids").map(String::as_str) {
            Some("3") => (
                StatusCode::OK,
                Json(json!({
                    "users": [{
                        "fid": 3,
                        "username": "dwr",
                        "display_name": "Dan Romero",
                        "pfp_url": "https://img/dwr.png",
                        "profile": {"bio": {"text": "Working on Farcaster"}},
                        "follower_count": 1000,
                        "following_count": 200
                    }]
                })),
            ),
            Some("5") => (StatusCode::OK, Json(json!({"users": [{"fid": 5}]}))),
            Some("500") => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": "upstream exploded"})),
            ),
            _ => (StatusCode::OK, Json(json!({"users": []}))),
        }
    }

    async fn feed(Query(query): Query<HashMap<String, String>>) -> impl IntoResponse {
        assert_eq!(query.get("feed_type").map(String::as_str), Some("following"));
        assert_eq!(query.get("limit").map(String::as_str), Some("10"));

        Json(json!({
            "casts": [
                {"hash": "0xaaa", "text": "gm", "timestamp": "2024-01-01T00:00:00Z"},
                {"hash": "0xbbb", "text": "hello", "timestamp": "2024-01-02T00:00:00Z", "author": {"fid": 2}}
            ],
            "next": {"cursor": null}
        }))
    }

    /// Serves a stand-in Neynar API on a random local port.
    pub(crate) async fn spawn_fake_neynar() -> String {
        let app = Router::new()
            .route("/v2/farcaster/user/bulk", get(bulk))
            .route("/v2/farcaster/feed", get(feed));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}")
    }

    fn client(base_url: &str, key: &str) -> NeynarClient {
        NeynarClient::new(Some(SecretString::from(key.to_string())), base_url).unwrap()
    }

    #[test]
    fn test_missing_api_key() {
        assert!(matches!(
            NeynarClient::new(None, DEFAULT_BASE_URL),
            Err(NeynarError::MissingApiKey)
        ));
        assert!(matches!(
            NeynarClient::new(Some(SecretString::from("  ".to_string())), DEFAULT_BASE_URL),
            Err(NeynarError::MissingApiKey)
        ));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            NeynarClient::new(Some(SecretString::from("k".to_string())), "not a url"),
            Err(NeynarError::Url(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_user_and_casts() {
        let base = spawn_fake_neynar().await;
        let me = client(&base, TEST_API_KEY)
            .fetch_user_and_casts(3)
            .await
            .unwrap();

        assert_eq!(me.fid, 3);
        assert_eq!(me.username, "dwr");
        assert_eq!(me.display_name, "Dan Romero");
        assert_eq!(me.bio, "Working on Farcaster");
        assert_eq!(me.pfp_url, "https://img/dwr.png");
        assert_eq!(me.follower_count, 1000);
        assert_eq!(me.following_count, 200);
        assert_eq!(me.recent_casts.len(), 2);
        assert_eq!(me.recent_casts[0].hash, "0xaaa");
        assert_eq!(me.recent_casts[1].text, "hello");
    }

    #[tokio::test]
    async fn test_sparse_user_defaults() {
        let base = spawn_fake_neynar().await;
        let me = client(&base, TEST_API_KEY)
            .fetch_user_and_casts(5)
            .await
            .unwrap();

        assert_eq!(me.fid, 5);
        assert_eq!(me.username, "");
        assert_eq!(me.bio, "");
        assert_eq!(me.follower_count, 0);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let base = spawn_fake_neynar().await;
        let err = client(&base, TEST_API_KEY)
            .fetch_user_and_casts(99)
            .await
            .unwrap_err();
        assert!(matches!(err, NeynarError::UserNotFound(99)));
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let base = spawn_fake_neynar().await;
        let err = client(&base, "wrong")
            .fetch_user_and_casts(3)
            .await
            .unwrap_err();
        assert!(matches!(err, NeynarError::Unauthorized));
    }

    #[tokio::test]
    async fn test_api_error_message() {
        let base = spawn_fake_neynar().await;
        let err = client(&base, TEST_API_KEY)
            .fetch_user_and_casts(500)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Neynar API error (500): upstream exploded");
    }
}
