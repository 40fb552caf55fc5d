use super::{host::HostError, message::MessageError};
use thiserror::Error;

const CONTEXT_FALLBACK: &str = "Failed to load context";
const SIGN_IN_FALLBACK: &str = "Sign-in failed";

/// Failures surfaced by the session controller. They never escape the
/// controller; each one is rendered into the snapshot's `error` string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Sign-in only works when this app is opened as a Farcaster Mini App.")]
    HostUnavailable,
    #[error("{0}")]
    ContextLoadFailed(String),
    #[error("{0}")]
    SignInExchangeFailed(String),
    #[error("{0}")]
    MessageParseFailed(String),
}

impl SessionError {
    pub(crate) fn context_load(err: &HostError) -> Self {
        Self::ContextLoadFailed(or_fallback(err.message(), CONTEXT_FALLBACK))
    }

    pub(crate) fn exchange(err: &HostError) -> Self {
        Self::SignInExchangeFailed(or_fallback(err.message(), SIGN_IN_FALLBACK))
    }

    pub(crate) fn incomplete_exchange() -> Self {
        Self::SignInExchangeFailed("Invalid sign-in response from host".to_string())
    }
}

impl From<MessageError> for SessionError {
    fn from(err: MessageError) -> Self {
        Self::MessageParseFailed(err.to_string())
    }
}

fn or_fallback(message: &str, fallback: &str) -> String {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}
