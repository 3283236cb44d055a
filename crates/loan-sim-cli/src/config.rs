//! CLI configuration.
//!
//! Read from a TOML file (default `loansim.toml` in the working directory).
//! A missing default file means built-in defaults; a missing file that was
//! named explicitly is an error. `LOANSIM_CATALOG` overrides the catalog path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};
use crate::output::OutputFormat;

pub const DEFAULT_CONFIG_PATH: &str = "loansim.toml";
pub const CATALOG_ENV: &str = "LOANSIM_CATALOG";

#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// JSON file backing the product catalog
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Output format used when `--output` is not given
    #[serde(default)]
    pub output: Option<OutputFormat>,

    /// Tracing filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("loansim-catalog.json")
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            output: None,
            log_level: default_log_level(),
        }
    }
}

impl CliConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Resolve configuration for this run.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(Path::new(path))?,
            None if Path::new(DEFAULT_CONFIG_PATH).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => Self::default(),
        };

        if let Ok(path) = std::env::var(CATALOG_ENV) {
            if !path.is_empty() {
                config.catalog_path = PathBuf::from(path);
            }
        }

        Ok(config)
    }
}
