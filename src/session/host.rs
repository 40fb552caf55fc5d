//! Host capability surface consumed by the session controller. The Farcaster
//! client embedding the mini app provides readiness signaling, host detection,
//! ambient identity and the sign-in ceremony; implementations bridge those
//! calls to whatever transport the embedding uses (a JS bridge, a test double).
//! Wire types mirror the host's camelCase JSON so bridges can decode directly.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by the host for any capability call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct HostError {
    message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Identity the host already knows about when the mini app opens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextUser {
    #[serde(default)]
    pub fid: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pfp_url: Option<String>,
}

/// Ambient session context provided by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ContextUser>,
}

/// Parameters for the host signing ceremony.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub nonce: String,
    /// Accept an auth-scoped signing key, not only the custody key.
    pub accept_auth_address: bool,
}

/// Signed message returned by the host. Either field may be missing when the
/// host misbehaves; the controller treats that as a failed exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInResult {
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Capabilities offered by a Farcaster Mini App host client.
#[async_trait]
pub trait MiniAppHost: Send + Sync {
    /// Tells the host the UI can be displayed. Fire-and-forget.
    fn signal_ready(&self);

    /// Whether the app runs inside a conformant host.
    async fn detect_host(&self) -> Result<bool, HostError>;

    /// Current ambient identity, if any.
    async fn context(&self) -> Result<HostContext, HostError>;

    /// Prompts the host's signing ceremony over the given nonce.
    async fn sign_in(&self, request: SignInRequest) -> Result<SignInResult, HostError>;
}
