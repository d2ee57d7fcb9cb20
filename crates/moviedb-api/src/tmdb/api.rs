//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{MovieDetail, MovieSummary, PageResult, TimeWindow};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
///
/// Failures carry a [`TmdbError`](super::TmdbError) inside the returned
/// `anyhow::Error`; use [`upstream_status`](super::upstream_status) to read
/// the HTTP status back out.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Fetches one page of the popular movie listing.
    ///
    /// # Errors
    ///
    /// Returns an error on a non-2xx status, a transport failure, or a JSON
    /// decode failure.
    async fn popular_movies(&self, page: u32) -> Result<PageResult<MovieSummary>>;

    /// Fetches one page of the top rated movie listing.
    ///
    /// # Errors
    ///
    /// Returns an error on a non-2xx status, a transport failure, or a JSON
    /// decode failure.
    async fn top_rated_movies(&self, page: u32) -> Result<PageResult<MovieSummary>>;

    /// Fetches trending movies for the given window.
    ///
    /// The endpoint takes no page parameter and always answers with its
    /// first page.
    ///
    /// # Errors
    ///
    /// Returns an error on a non-2xx status, a transport failure, or a JSON
    /// decode failure.
    async fn trending_movies(&self, window: TimeWindow) -> Result<PageResult<MovieSummary>>;

    /// Searches movies by title. The query is sent as given.
    ///
    /// # Errors
    ///
    /// Returns an error on a non-2xx status, a transport failure, or a JSON
    /// decode failure.
    async fn search_movies(&self, query: &str, page: u32) -> Result<PageResult<MovieSummary>>;

    /// Fetches a movie with its credits and videos embedded in one request.
    ///
    /// # Errors
    ///
    /// Returns an error on a non-2xx status (404 for an unknown id), a
    /// transport failure, or a JSON decode failure.
    async fn movie_details(&self, movie_id: u64) -> Result<MovieDetail>;
}
