//! Search results page.

use anyhow::Result;
use moviedb_api::tmdb::{MovieSummary, PageResult, TmdbApi};

use super::{GENERIC_ERROR_MESSAGE, LoadState, Pagination, RequestToken, RequestTracker};

/// Request ticket for one search page.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Token the outcome is applied under.
    pub token: RequestToken,
    /// Query text, sent as given.
    pub query: String,
    /// Page to fetch.
    pub page: u32,
}

impl SearchRequest {
    /// Fetches the page.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn send<A: TmdbApi>(&self, api: &A) -> Result<PageResult<MovieSummary>> {
        api.search_movies(&self.query, self.page).await
    }
}

/// Controller for the search page.
#[derive(Debug)]
pub struct SearchController {
    query: String,
    page: u32,
    total_pages: u32,
    state: LoadState<Vec<MovieSummary>>,
    tracker: RequestTracker,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchController {
    /// Creates an idle controller with an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self {
            query: String::new(),
            page: 1,
            total_pages: 1,
            state: LoadState::Idle,
            tracker: RequestTracker::default(),
        }
    }

    /// Current query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns `true` if the query is empty or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
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

    /// Replaces the query. A changed query starts over on page 1.
    ///
    /// Returns `true` if the query changed.
    pub fn set_query(&mut self, query: &str) -> bool {
        if query == self.query {
            return false;
        }
        self.query = String::from(query);
        self.page = 1;
        self.total_pages = 1;
        self.tracker.invalidate();
        true
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

    /// Issues a request ticket for the current query and page.
    ///
    /// A blank query settles immediately on an empty result without a
    /// ticket, and supersedes any request still in flight.
    pub fn begin(&mut self) -> Option<SearchRequest> {
        if self.is_blank() {
            self.tracker.invalidate();
            self.total_pages = 1;
            self.state = LoadState::Loaded(Vec::new());
            return None;
        }
        self.state = LoadState::Loading;
        Some(SearchRequest {
            token: self.tracker.issue(),
            query: self.query.clone(),
            page: self.page,
        })
    }

    /// Applies a result. Returns `false` if `token` is stale.
    pub fn finish(
        &mut self,
        token: RequestToken,
        result: Result<PageResult<MovieSummary>>,
    ) -> bool {
        if !self.tracker.is_current(token) {
            tracing::debug!(query = %self.query, "discarding stale search response");
            return false;
        }
        self.state = match result {
            Ok(page) => {
                self.total_pages = page.total_pages.max(1);
                LoadState::Loaded(page.results)
            }
            Err(err) => {
                tracing::warn!(
                    query = %self.query,
                    page = self.page,
                    error = %err,
                    "search failed"
                );
                LoadState::Errored(String::from(GENERIC_ERROR_MESSAGE))
            }
        };
        true
    }

    /// Fetches and applies the current page, or settles a blank query.
    pub async fn load<A: TmdbApi>(&mut self, api: &A) {
        if let Some(request) = self.begin() {
            let result = request.send(api).await;
            self.finish(request.token, result);
        }
    }
}
