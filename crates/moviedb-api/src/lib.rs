//! API client library for moviedb.
//!
//! Provides a client for the TMDB movie metadata API.

/// TMDB API client.
pub mod tmdb;
