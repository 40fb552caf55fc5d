//! Session controller for the Farcaster Mini App sign-in flow. It detects the
//! host once, hydrates ambient identity from the host context, runs explicit
//! sign-in exchanges and publishes every transition through a watch channel so
//! presentation layers only ever observe snapshots. No failure escapes the
//! controller: each one lands in the snapshot's `error` with `SignedOut`.

use super::{
    error::SessionError,
    host::{HostContext, MiniAppHost, SignInRequest},
    message,
    nonce::{self, NONCE_LENGTH},
};
use serde::Serialize;
use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    #[default]
    Loading,
    SignedOut,
    SignedIn,
}

/// Signed-in identity. Context hydration fills the profile fields; explicit
/// sign-in fills address, signature and message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub fid: u64,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pfp_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Session state owned by a single controller.
#[derive(Debug, Clone, Default)]
pub struct Session {
    status: SessionStatus,
    in_mini_app: Option<bool>,
    user: Option<User>,
    error: Option<String>,
}

impl Session {
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// The identity, visible only while signed in.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user
            .as_ref()
            .filter(|_| self.status == SessionStatus::SignedIn)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// `None` while host detection has not resolved.
    #[must_use]
    pub fn host_detected(&self) -> Option<bool> {
        self.in_mini_app
    }

    #[must_use]
    pub fn is_in_mini_app(&self) -> bool {
        self.in_mini_app.unwrap_or(false)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            user: self.user().cloned(),
            error: self.error.clone(),
            is_in_mini_app: self.is_in_mini_app(),
        }
    }
}

/// Read-only view handed to presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub user: Option<User>,
    pub error: Option<String>,
    pub is_in_mini_app: bool,
}

pub struct SessionController<H: ?Sized> {
    host: Arc<H>,
    state: watch::Sender<Session>,
    alive: AtomicBool,
    started: AtomicBool,
    // Bumped by every sign-in, sign-out and negative detection; async results
    // from older generations are dropped.
    attempts: AtomicU64,
}

impl<H: MiniAppHost + ?Sized> SessionController<H> {
    #[must_use]
    pub fn new(host: Arc<H>) -> Self {
        let (state, _) = watch::channel(Session::default());

        Self {
            host,
            state,
            alive: AtomicBool::new(true),
            started: AtomicBool::new(false),
            attempts: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().snapshot()
    }

    /// Subscribes to session transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Signals readiness, detects the host and, inside a host, hydrates the
    /// session from the host context. Only the first call does any work.
    #[instrument(skip(self))]
    pub async fn start(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            debug!("session controller already started");
            return;
        }

        self.host.signal_ready();

        // Any sign-in or sign-out issued from here on supersedes the context.
        let generation = self.attempts.load(Ordering::SeqCst);

        let in_mini_app = match self.host.detect_host().await {
            Ok(detected) => detected,
            Err(err) => {
                warn!("host detection failed: {}", err);
                false
            }
        };

        debug!("running inside a mini app host: {}", in_mini_app);

        if !in_mini_app {
            // A sign-in started before detection resolved must not land.
            self.attempts.fetch_add(1, Ordering::SeqCst);
        }

        let applied = self.update(|session| {
            session.in_mini_app = Some(in_mini_app);
            if !in_mini_app {
                session.status = SessionStatus::SignedOut;
            }
        });

        if applied && in_mini_app {
            self.load_context(generation).await;
        }
    }

    async fn load_context(&self, generation: u64) {
        let result = self.host.context().await;

        if self.attempts.load(Ordering::SeqCst) != generation {
            debug!("session changed since startup, discarding context");
            return;
        }

        match result {
            Ok(HostContext { user: Some(user) }) if user.fid > 0 => {
                info!(fid = user.fid, "session hydrated from host context");

                self.update(|session| {
                    session.user = Some(User {
                        fid: user.fid,
                        // Only known after an explicit sign-in
                        address: String::new(),
                        username: user.username,
                        display_name: user.display_name,
                        pfp_url: user.pfp_url,
                        signature: None,
                        message: None,
                    });
                    session.status = SessionStatus::SignedIn;
                });
            }

            Ok(_) => {
                debug!("host context carries no user");

                self.update(|session| session.status = SessionStatus::SignedOut);
            }

            Err(err) => {
                let err = SessionError::context_load(&err);
                error!("Error loading mini app context: {}", err);

                self.update(|session| {
                    session.error = Some(err.to_string());
                    session.status = SessionStatus::SignedOut;
                });
            }
        }
    }

    /// Runs the host sign-in ceremony and replaces the user with the signed
    /// identity. Repeated calls are not rejected; only the latest one applies.
    #[instrument(skip(self))]
    pub async fn sign_in(&self) {
        if !self.is_alive() {
            debug!("ignoring sign-in after teardown");
            return;
        }

        let in_mini_app = self.state.borrow().in_mini_app;

        if in_mini_app == Some(false) {
            let err = SessionError::HostUnavailable;
            warn!("{}", err);

            self.update(|session| session.error = Some(err.to_string()));
            return;
        }

        let generation = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;

        self.update(|session| {
            session.error = None;
            session.status = SessionStatus::Loading;
        });

        let outcome = self.exchange().await;

        if self.attempts.load(Ordering::SeqCst) != generation {
            debug!("discarding superseded sign-in attempt {}", generation);
            return;
        }

        match outcome {
            Ok(user) => {
                info!(fid = user.fid, "signed in");

                self.update(|session| {
                    session.user = Some(user);
                    session.status = SessionStatus::SignedIn;
                });
            }

            Err(err) => {
                error!("Sign-in error: {}", err);

                self.update(|session| {
                    session.error = Some(err.to_string());
                    session.status = SessionStatus::SignedOut;
                });
            }
        }
    }

    async fn exchange(&self) -> Result<User, SessionError> {
        let request = SignInRequest {
            nonce: nonce::generate(NONCE_LENGTH),
            accept_auth_address: true,
        };

        let result = self
            .host
            .sign_in(request)
            .await
            .map_err(|err| SessionError::exchange(&err))?;

        let (Some(signature), Some(message)) = (
            result.signature.filter(|s| !s.is_empty()),
            result.message.filter(|m| !m.is_empty()),
        ) else {
            return Err(SessionError::incomplete_exchange());
        };

        let parsed = message::parse(&message)?;

        Ok(User {
            fid: parsed.fid,
            address: parsed.address,
            signature: Some(signature),
            message: Some(message),
            ..User::default()
        })
    }

    /// Forgets the identity and any error.
    pub fn sign_out(&self) {
        // Invalidate any in-flight sign-in so it cannot sign the user back in.
        self.attempts.fetch_add(1, Ordering::SeqCst);

        self.update(|session| {
            session.user = None;
            session.error = None;
            session.status = SessionStatus::SignedOut;
        });
    }

    /// Detaches the controller from its view. Pending host calls may still
    /// resolve, but their results are discarded.
    pub fn teardown(&self) {
        if self.alive.swap(false, Ordering::SeqCst) {
            debug!("session controller torn down");
        }
    }

    fn update(&self, apply: impl FnOnce(&mut Session)) -> bool {
        if !self.is_alive() {
            debug!("ignoring session update after teardown");
            return false;
        }

        self.state.send_modify(apply);

        true
    }
}
