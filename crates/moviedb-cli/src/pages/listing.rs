//! Paginated popular and top rated listings.

use std::fmt;

use anyhow::Result;
use moviedb_api::tmdb::{MovieSummary, PageResult, TmdbApi};

use super::{GENERIC_ERROR_MESSAGE, LoadState, Pagination, RequestToken, RequestTracker};

/// Which listing endpoint a controller pages through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    /// `movie/popular`.
    Popular,
    /// `movie/top_rated`.
    TopRated,
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Popular => f.write_str("popular"),
            Self::TopRated => f.write_str("top rated"),
        }
    }
}

/// Request ticket for one listing page.
#[derive(Debug, Clone)]
pub struct ListingRequest {
    /// Token the outcome is applied under.
    pub token: RequestToken,
    /// Endpoint to call.
    pub listing: Listing,
    /// Page to fetch.
    pub page: u32,
}

impl ListingRequest {
    /// Fetches the page.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn send<A: TmdbApi>(&self, api: &A) -> Result<PageResult<MovieSummary>> {
        match self.listing {
            Listing::Popular => api.popular_movies(self.page).await,
            Listing::TopRated => api.top_rated_movies(self.page).await,
        }
    }
}

/// Controller for a paginated listing page.
#[derive(Debug)]
pub struct ListingController {
    listing: Listing,
    page: u32,
    total_pages: u32,
    state: LoadState<Vec<MovieSummary>>,
    tracker: RequestTracker,
}

impl ListingController {
    /// Creates an idle controller on page 1.
    #[must_use]
    pub fn new(listing: Listing) -> Self {
        Self {
            listing,
            page: 1,
            total_pages: 1,
            state: LoadState::Idle,
            tracker: RequestTracker::default(),
        }
    }

    /// Endpoint this controller pages through.
    #[must_use]
    pub const fn listing(&self) -> Listing {
        self.listing
    }

    /// Current load state.
    #[must_use]
    pub const fn state(&self) -> &LoadState<Vec<MovieSummary>> {
        &self.state
    }

    /// Current page and the last known page count.
    #[must_use]
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.total_pages)
    }

    /// Sets the page (0 becomes 1). Returns `true` if it changed.
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        if page == self.page {
            return false;
        }
        self.page = page;
        self.tracker.invalidate();
        true
    }

    /// Advances one page unless already on the last. Returns `true` if it moved.
    pub fn next_page(&mut self) -> bool {
        self.pagination()
            .next()
            .is_some_and(|page| self.set_page(page))
    }

    /// Goes back one page unless already on the first. Returns `true` if it moved.
    pub fn previous_page(&mut self) -> bool {
        self.pagination()
            .previous()
            .is_some_and(|page| self.set_page(page))
    }

    /// Marks the page loading and issues a request ticket for the current page.
    pub fn begin(&mut self) -> ListingRequest {
        self.state = LoadState::Loading;
        ListingRequest {
            token: self.tracker.issue(),
            listing: self.listing,
            page: self.page,
        }
    }

    /// Applies a result. Returns `false` if `token` is stale.
    pub fn finish(
        &mut self,
        token: RequestToken,
        result: Result<PageResult<MovieSummary>>,
    ) -> bool {
        if !self.tracker.is_current(token) {
            tracing::debug!(listing = %self.listing, "discarding stale listing response");
            return false;
        }
        self.state = match result {
            Ok(page) => {
                self.total_pages = page.total_pages.max(1);
                LoadState::Loaded(page.results)
            }
            Err(err) => {
                tracing::warn!(
                    listing = %self.listing,
                    page = self.page,
                    error = %err,
                    "failed to load listing"
                );
                LoadState::Errored(String::from(GENERIC_ERROR_MESSAGE))
            }
        };
        true
    }

    /// Fetches and applies the current page.
    pub async fn load<A: TmdbApi>(&mut self, api: &A) {
        let request = self.begin();
        let result = request.send(api).await;
        self.finish(request.token, result);
    }
}
