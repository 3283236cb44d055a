use serde::de::DeserializeOwned;
use std::io::{self, Read};

use crate::error::{CliError, Result};

/// Deserialise a payload piped on stdin. An interactive terminal or blank
/// input yields `None` so the caller can fall back to flags.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped<T: DeserializeOwned>(buffer: &str) -> Result<Option<T>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|e| CliError::usage(format!("Failed to parse stdin: {e}")))
}
