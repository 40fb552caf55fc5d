use crate::{
    api::handlers::embed::EmbedConfig,
    cli::actions::{server, Action},
};
use anyhow::{anyhow, Result};
use secrecy::SecretString;

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let string = |name: &str| -> Result<String> {
        matches
            .get_one::<String>(name)
            .map(ToString::to_string)
            .ok_or_else(|| anyhow!("missing required argument: --{name}"))
    };

    Ok(Action::Server(server::Args {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        neynar_url: string("neynar-url")?,
        neynar_api_key: matches
            .get_one::<String>("neynar-api-key")
            .map(|key| SecretString::from(key.clone())),
        embed: EmbedConfig {
            domain: string("domain")?,
            title: string("title")?,
            description: string("description")?,
            button_title: string("button-title")?,
        },
    }))
}
