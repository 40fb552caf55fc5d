use crate::{api::handlers::embed, neynar};
use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};
use url::Url;

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn validator_url() -> ValueParser {
    ValueParser::from(move |value: &str| -> std::result::Result<String, String> {
        let url = Url::parse(value).map_err(|e| format!("invalid URL: {e}"))?;

        match url.scheme() {
            "http" | "https" => Ok(value.trim_end_matches('/').to_string()),
            scheme => Err(format!("unsupported scheme: {scheme}")),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("miniapp")
        .about("Farcaster Mini App session core and companion API")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("MINIAPP_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("neynar-api-key")
                .long("neynar-api-key")
                .help("Neynar server API key, profile lookups fail without it")
                .env("NEYNAR_API_KEY")
                .hide_env_values(true),
        )
        .arg(
            Arg::new("neynar-url")
                .long("neynar-url")
                .help("Neynar API base URL")
                .default_value(neynar::DEFAULT_BASE_URL)
                .env("MINIAPP_NEYNAR_URL")
                .value_parser(validator_url()),
        )
        .arg(
            Arg::new("domain")
                .long("domain")
                .help("Public domain of the mini app, used for embed URLs")
                .default_value(embed::DEFAULT_DOMAIN)
                .env("MINIAPP_DOMAIN"),
        )
        .arg(
            Arg::new("title")
                .long("title")
                .help("Mini app title")
                .default_value(embed::DEFAULT_TITLE)
                .env("MINIAPP_TITLE"),
        )
        .arg(
            Arg::new("description")
                .long("description")
                .help("Mini app description")
                .default_value(embed::DEFAULT_DESCRIPTION)
                .env("MINIAPP_DESCRIPTION"),
        )
        .arg(
            Arg::new("button-title")
                .long("button-title")
                .help("Label of the embed launch button")
                .default_value(embed::DEFAULT_BUTTON_TITLE)
                .env("MINIAPP_BUTTON_TITLE"),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("MINIAPP_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        )
}
