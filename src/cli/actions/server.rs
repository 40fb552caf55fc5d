use crate::{
    api::{self, handlers::embed::EmbedConfig, AppState},
    neynar::{NeynarClient, NeynarError},
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub neynar_url: String,
    pub neynar_api_key: Option<SecretString>,
    pub embed: EmbedConfig,
}

/// Build the shared state, a missing API key only disables profile lookups.
/// # Errors
/// Returns an error if the Neynar client cannot be configured.
pub fn state(args: &Args) -> Result<AppState> {
    let neynar = match NeynarClient::new(args.neynar_api_key.clone(), &args.neynar_url) {
        Ok(client) => Some(Arc::new(client)),
        Err(NeynarError::MissingApiKey) => {
            warn!("NEYNAR_API_KEY is not set, /api/neynar/me will fail");
            None
        }
        Err(e) => return Err(e).context("Failed to configure Neynar client"),
    };

    Ok(AppState {
        neynar,
        embed: Arc::new(args.embed.clone()),
    })
}

/// Execute the server action.
/// # Errors
/// Returns an error if the state cannot be built or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    debug!(
        port = args.port,
        neynar_url = %args.neynar_url,
        domain = %args.embed.domain,
        "starting server"
    );

    let state = state(&args)?;

    info!("Mini app embed URL: {}", args.embed.base_url());

    api::new(args.port, state).await
}
