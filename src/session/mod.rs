//! Farcaster Mini App authentication session.
//!
//! [`SessionController`] owns the session for one view: host detection,
//! context hydration, explicit sign-in and sign-out. The host is injected as a
//! [`MiniAppHost`] so embeddings and tests supply their own bridge.

pub mod controller;
pub mod error;
pub mod host;
pub mod message;
pub mod nonce;
pub mod view;

pub use controller::{Session, SessionController, SessionSnapshot, SessionStatus, User};
pub use error::SessionError;
pub use host::{ContextUser, HostContext, HostError, MiniAppHost, SignInRequest, SignInResult};
