//! Terminal front end for TMDB.
//!
//! Page controllers drive the [`moviedb_api`] client; `view` renders their
//! state as text for the one-shot commands and `tui` hosts the same
//! controllers in an interactive browser.

/// Application configuration (TOML).
pub mod config;
/// Page controllers.
pub mod pages;
/// Navigation locations.
pub mod route;
/// Terminal UI components.
pub mod tui;
/// Plain-text rendering.
pub mod view;
