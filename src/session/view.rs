//! View model derived from a session snapshot. It captures what the auth card
//! and the home page decide to show so any renderer (DOM bindings, a TUI, a
//! test) produces the same screens without re-deriving them from raw state.

use super::controller::{SessionSnapshot, SessionStatus};

const HOST_REQUIRED_NOTICE: &str =
    "This app requires opening from within a Farcaster client to enable sign-in functionality.";

const SIGN_IN_LABEL: &str = "Sign In with Farcaster";
const SIGNING_IN_LABEL: &str = "Signing in...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInButton {
    pub label: &'static str,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedInCard {
    pub fid: u64,
    /// Rendered as `@username`.
    pub handle: Option<String>,
    pub display_name: Option<String>,
    pub short_address: Option<String>,
    pub raw_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCard {
    /// Shown outside a host client, where sign-in cannot work.
    HostRequired { notice: &'static str },
    SignedIn(SignedInCard),
    SignIn {
        error: Option<String>,
        button: SignInButton,
    },
}

/// Top-level screen selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Loading,
    /// Title, description and the auth card; `prompt` adds the sign-in hint.
    Landing { prompt: bool, card: AuthCard },
    Home { card: AuthCard, fid: u64, handle: Option<String> },
}

impl AuthCard {
    #[must_use]
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        if !snapshot.is_in_mini_app {
            return Self::HostRequired {
                notice: HOST_REQUIRED_NOTICE,
            };
        }

        if let (SessionStatus::SignedIn, Some(user)) = (snapshot.status, &snapshot.user) {
            return Self::SignedIn(SignedInCard {
                fid: user.fid,
                handle: non_empty(user.username.as_deref()).map(|name| format!("@{name}")),
                display_name: non_empty(user.display_name.as_deref()).map(str::to_string),
                short_address: non_empty(Some(user.address.as_str())).map(short_address),
                raw_message: non_empty(user.message.as_deref()).map(str::to_string),
            });
        }

        let loading = snapshot.status == SessionStatus::Loading;

        Self::SignIn {
            error: snapshot.error.clone().filter(|e| !e.is_empty()),
            button: SignInButton {
                label: if loading { SIGNING_IN_LABEL } else { SIGN_IN_LABEL },
                disabled: loading,
            },
        }
    }
}

impl Page {
    #[must_use]
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        if snapshot.status == SessionStatus::Loading {
            return Self::Loading;
        }

        let card = AuthCard::from_snapshot(snapshot);

        if !snapshot.is_in_mini_app {
            return Self::Landing {
                prompt: false,
                card,
            };
        }

        match (&snapshot.status, &snapshot.user) {
            (SessionStatus::SignedIn, Some(user)) => Self::Home {
                fid: user.fid,
                handle: non_empty(user.username.as_deref()).map(|name| format!("@{name}")),
                card,
            },
            _ => Self::Landing { prompt: true, card },
        }
    }
}

/// Shortens an address to `0xABCD…EF01`.
#[must_use]
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }

    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();

    format!("{head}…{tail}")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
