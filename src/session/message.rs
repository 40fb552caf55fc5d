//! Extraction of identity claims from the plaintext message returned by the
//! host sign-in ceremony. The message is SIWE-like and loosely structured, so
//! parsing stays narrow: the fid is mandatory, the address is best-effort.

use regex::Regex;
use thiserror::Error;

const FID_PATTERN: &str = r"farcaster://fid/(\d+)";
const ACCOUNT_PATTERN: &str = r"account:\s*(0x[a-fA-F0-9]{40})";
const BARE_ADDRESS_PATTERN: &str = r"(?m)^(0x[a-fA-F0-9]{40})\s*$";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessageError {
    #[error("Could not parse FID from sign-in message")]
    MissingFid,
    #[error("Invalid FID in sign-in message: {0}")]
    InvalidFid(String),
    #[error("invalid message pattern: {0}")]
    Pattern(String),
}

/// Identity claims carried by a signed sign-in message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInMessage {
    pub fid: u64,
    /// Signer address, empty when the message carries none.
    pub address: String,
}

/// Parses the fid and signer address out of a sign-in message.
///
/// # Errors
///
/// Returns [`MessageError::MissingFid`] when no `farcaster://fid/<digits>` URI
/// is present and [`MessageError::InvalidFid`] when the digits are zero or do
/// not fit a `u64`.
pub fn parse(message: &str) -> Result<SignInMessage, MessageError> {
    let fid = parse_fid(message)?;
    let address = parse_address(message)?.unwrap_or_default();

    Ok(SignInMessage { fid, address })
}

fn parse_fid(message: &str) -> Result<u64, MessageError> {
    let re = compile(FID_PATTERN)?;

    let digits = re
        .captures(message)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
        .ok_or(MessageError::MissingFid)?;

    match digits.parse::<u64>() {
        Ok(0) | Err(_) => Err(MessageError::InvalidFid(digits.to_string())),
        Ok(fid) => Ok(fid),
    }
}

/// Labeled `account:` address first, then a bare address on its own line.
fn parse_address(message: &str) -> Result<Option<String>, MessageError> {
    for pattern in [ACCOUNT_PATTERN, BARE_ADDRESS_PATTERN] {
        let re = compile(pattern)?;

        if let Some(address) = re.captures(message).and_then(|captures| captures.get(1)) {
            return Ok(Some(address.as_str().to_string()));
        }
    }

    Ok(None)
}

fn compile(pattern: &str) -> Result<Regex, MessageError> {
    Regex::new(pattern).map_err(|e| MessageError::Pattern(e.to_string()))
}
