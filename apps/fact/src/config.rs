//! # Configuration
//!
//! Optional TOML configuration for the fact binary.
//!
//! Lookup order for every setting: command-line flag, then environment
//! (logging only), then the config file, then the built-in default.
//!
//! ```toml
//! database = "facts/ari.redb"   # "" keeps everything in memory
//! log_format = "json"           # "text" (default) or "json"
//! log_filter = "fact=debug"     # used when RUST_LOG is unset
//! ```

use fact_core::FactError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "fact.toml";

/// Database used when neither the CLI nor the config file names one.
pub const DEFAULT_DATABASE: &str = "fact.redb";

/// Environment variable selecting the log format.
pub const LOG_FORMAT_ENV: &str = "FACT_LOG_FORMAT";

/// Settings loaded from the config file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FactConfig {
    /// Database path; an empty string selects the in-memory store.
    pub database: Option<PathBuf>,
    /// `text` or `json`.
    pub log_format: Option<String>,
    /// Default tracing filter directive.
    pub log_filter: Option<String>,
}

impl FactConfig {
    /// Load the explicit config file, or `fact.toml` if present, or defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, FactError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> Result<Self, FactError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            FactError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        Self::parse(&text)
    }

    /// Parse config text.
    pub fn parse(text: &str) -> Result<Self, FactError> {
        toml::from_str(text)
            .map_err(|e| FactError::SerializationError(format!("Invalid config: {}", e)))
    }

    /// Resolve the database path: `--memory`, then `--database`, then the file.
    pub fn database_path(&self, memory: bool, cli: Option<&Path>) -> PathBuf {
        if memory {
            return PathBuf::new();
        }
        cli.map(Path::to_path_buf)
            .or_else(|| self.database.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
    }

    /// Resolve the log format: environment, then the file, then `text`.
    pub fn log_format(&self) -> String {
        std::env::var(LOG_FORMAT_ENV)
            .ok()
            .or_else(|| self.log_format.clone())
            .unwrap_or_else(|| "text".to_string())
    }
}
