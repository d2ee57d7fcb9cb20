//! `AppConfig` struct, TOML loading and client settings resolution.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use url::Url;

/// Environment variable holding the TMDB API key.
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Top-level application configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB connection settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// TMDB connection configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct TmdbConfig {
    /// API base URL override (defaults to TMDB API v3).
    #[serde(default)]
    pub base_url: Option<String>,
    /// API key. The `TMDB_API_KEY` environment variable takes precedence.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Settings injected into the TMDB client builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientSettings {
    /// Base URL override.
    pub base_url: Option<Url>,
    /// API key (absent keys are reported by the client, not here).
    pub api_key: Option<String>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Resolves client settings, preferring `env_api_key` over the file key.
    ///
    /// Blank keys count as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if `tmdb.base_url` is not a valid URL.
    pub fn client_settings(&self, env_api_key: Option<String>) -> Result<ClientSettings> {
        let base_url = self
            .tmdb
            .base_url
            .as_deref()
            .map(Url::parse)
            .transpose()
            .context("invalid tmdb.base_url in config")?;

        let api_key = env_api_key
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                self.tmdb
                    .api_key
                    .clone()
                    .filter(|key| !key.trim().is_empty())
            });

        Ok(ClientSettings { base_url, api_key })
    }
}
