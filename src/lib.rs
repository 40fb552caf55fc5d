//! # Miniapp (Farcaster Mini App session core)
//!
//! `miniapp` holds the pieces of a Farcaster Mini App that are more than
//! layout: the client authentication session and a small companion HTTP
//! service.
//!
//! ## Session
//!
//! [`session::SessionController`] detects whether the app runs inside a
//! Farcaster host client, hydrates ambient identity from the host context and
//! runs the Sign In with Farcaster exchange over a fresh nonce. The host bridge
//! is injected as a [`session::MiniAppHost`], so the same controller drives a
//! browser embedding or a scripted test double.
//!
//! ## Companion API
//!
//! The `miniapp` binary serves the `fc:miniapp` embed document, a health probe
//! and `GET /api/neynar/me`, a read-only pass-through to Neynar returning the
//! user's profile and latest following-feed casts.

pub mod api;
pub mod cli;
pub mod neynar;
pub mod session;
pub mod text;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
