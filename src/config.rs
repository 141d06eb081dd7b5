//! Service configuration.
//!
//! Loaded from a JSON file, then overridden by environment variables:
//! - `ROOMBOOK_DB` - path of the sqlite database file
//! - `ROOMBOOK_PORT` - HTTP port

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::CreateRoomInput;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database file. Falls back to the platform data directory when unset.
    pub database_path: Option<PathBuf>,
    pub host: String,
    pub port: u16,
    /// Rooms ensured to exist at startup.
    pub rooms: Vec<CreateRoomInput>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            host: "127.0.0.1".to_string(),
            port: 8000,
            rooms: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Load the explicit file if given, else `config.json` if present, else defaults.
    /// Environment overrides are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    fn with_env_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(db) = var("ROOMBOOK_DB") {
            self.database_path = Some(PathBuf::from(db));
        }
        if let Some(port) = var("ROOMBOOK_PORT") {
            self.port = port
                .parse()
                .with_context(|| format!("ROOMBOOK_PORT is not a valid port: {port}"))?;
        }
        Ok(self)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
