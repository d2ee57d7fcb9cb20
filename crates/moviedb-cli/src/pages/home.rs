//! Home page: trending today plus the first popular page.

use anyhow::Result;
use moviedb_api::tmdb::{MovieSummary, TimeWindow, TmdbApi, upstream_status};

use super::{GENERIC_ERROR_MESSAGE, LoadState, RequestToken, RequestTracker};

/// Movies shown per home section.
pub const HOME_SECTION_LIMIT: usize = 8;

/// Message shown when TMDB rejects the API key.
pub const CONFIG_ERROR_MESSAGE: &str =
    "API key is invalid or missing. Please check your configuration.";

/// Both home sections, as returned by TMDB.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeData {
    /// Trending movies of the day.
    pub trending: Vec<MovieSummary>,
    /// Popular movies, page 1.
    pub popular: Vec<MovieSummary>,
}

impl HomeData {
    /// Trending movies to display.
    #[must_use]
    pub fn trending_preview(&self) -> &[MovieSummary] {
        preview(&self.trending)
    }

    /// Popular movies to display.
    #[must_use]
    pub fn popular_preview(&self) -> &[MovieSummary] {
        preview(&self.popular)
    }
}

fn preview(movies: &[MovieSummary]) -> &[MovieSummary] {
    movies.get(..HOME_SECTION_LIMIT).unwrap_or(movies)
}

/// Request ticket for the home sections.
#[derive(Debug, Clone)]
pub struct HomeRequest {
    /// Token the outcome is applied under.
    pub token: RequestToken,
}

impl HomeRequest {
    /// Fetches both sections concurrently. Fails if either fails.
    ///
    /// # Errors
    ///
    /// Returns the first failure of the two requests.
    pub async fn send<A: TmdbApi>(&self, api: &A) -> Result<HomeData> {
        let (trending, popular) =
            tokio::try_join!(api.trending_movies(TimeWindow::Day), api.popular_movies(1))?;
        Ok(HomeData {
            trending: trending.results,
            popular: popular.results,
        })
    }
}

/// Controller for the home page.
#[derive(Debug, Default)]
pub struct HomeController {
    state: LoadState<HomeData>,
    tracker: RequestTracker,
}

impl HomeController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current load state.
    #[must_use]
    pub const fn state(&self) -> &LoadState<HomeData> {
        &self.state
    }

    /// Marks the page loading and issues a request ticket.
    pub fn begin(&mut self) -> HomeRequest {
        self.state = LoadState::Loading;
        HomeRequest {
            token: self.tracker.issue(),
        }
    }

    /// Applies a result. Returns `false` if `token` is stale.
    pub fn finish(&mut self, token: RequestToken, result: Result<HomeData>) -> bool {
        if !self.tracker.is_current(token) {
            tracing::debug!("discarding stale home response");
            return false;
        }
        self.state = match result {
            Ok(data) => {
                tracing::debug!(
                    trending = data.trending.len(),
                    popular = data.popular.len(),
                    "home sections loaded"
                );
                LoadState::Loaded(data)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load home sections");
                LoadState::Errored(String::from(home_error_message(&err)))
            }
        };
        true
    }

    /// Fetches and applies both sections.
    pub async fn load<A: TmdbApi>(&mut self, api: &A) {
        let request = self.begin();
        let result = request.send(api).await;
        self.finish(request.token, result);
    }
}

/// Maps a home failure to its user-facing message.
///
/// A 401 from either request points at the API key; everything else gets
/// the generic message.
#[must_use]
pub fn home_error_message(err: &anyhow::Error) -> &'static str {
    if upstream_status(err) == Some(401) {
        CONFIG_ERROR_MESSAGE
    } else {
        GENERIC_ERROR_MESSAGE
    }
}
