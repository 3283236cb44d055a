use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

/// Read a JSON file and deserialise into a typed struct.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)?;
    serde_json::from_str(&contents).map_err(|e| {
        CliError::usage(format!("Failed to parse '{}': {}", canonical.display(), e))
    })
}

/// Resolve the path against the working directory and make sure it is a file.
fn resolve_path(path: &str) -> Result<PathBuf> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(CliError::usage(format!(
            "File not found: {}",
            canonical.display()
        )));
    }

    if !canonical.is_file() {
        return Err(CliError::usage(format!("Not a file: {}", canonical.display())));
    }

    Ok(canonical)
}
