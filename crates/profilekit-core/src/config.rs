//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the backend origin and the preferred OAuth2 provider.
//!
//! Configuration is stored at `~/.config/profilekit/config.json`.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config directory paths
const APP_NAME: &str = "profilekit";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Backend origin used when neither config nor environment supplies one.
/// Matches the development backend the OAuth2 app serves on.
const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";

/// Environment variable overriding the backend origin
const BACKEND_URL_ENV: &str = "PROFILEKIT_BACKEND_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub backend_url: Option<String>,
    pub default_provider: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Effective backend origin: config value, then environment, then default.
    pub fn backend_url(&self) -> String {
        self.backend_url
            .clone()
            .or_else(|| std::env::var(BACKEND_URL_ENV).ok())
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
    }

    /// OAuth2 provider used when the caller does not name one.
    pub fn provider(&self) -> String {
        self.default_provider
            .clone()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| "google".to_string())
    }
}
