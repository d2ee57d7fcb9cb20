//! Application configuration module.
//!
//! Reads the TOML config file and resolves the TMDB client settings
//! (base URL and API key) once at startup.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{API_KEY_ENV, AppConfig, ClientSettings, TmdbConfig};
pub use paths::resolve_config_path;
