//! Page controllers.
//!
//! Each view owns a controller that holds its request parameters and a
//! [`LoadState`]. A fetch is split into `begin` (issue a [`RequestToken`]
//! and a request ticket), sending the ticket, and `finish` (apply the
//! outcome). Outcomes carrying a superseded token are dropped, so a slow
//! response for an old page or query never overwrites a newer one.

pub mod details;
pub mod home;
pub mod listing;
pub mod search;

use anyhow::Result;
use moviedb_api::tmdb::{MovieDetail, MovieSummary, PageResult, TmdbApi};

use self::details::{DetailsController, DetailsRequest};
use self::home::{HomeController, HomeData, HomeRequest};
use self::listing::{Listing, ListingController, ListingRequest};
use self::search::{SearchController, SearchRequest};
use crate::route::Route;

/// Message shown when a listing fails for any reason other than credentials.
pub const GENERIC_ERROR_MESSAGE: &str = "Failed to load movies. Please try again later.";

/// Lifecycle of a page's remote data.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request succeeded.
    Loaded(T),
    /// The last request failed; holds a user-facing message.
    Errored(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T> LoadState<T> {
    /// Returns `true` while a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the loaded data, if any.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Loaded(data) => Some(data),
            _ => None,
        }
    }

    /// Returns the error message, if the last request failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Errored(message) => Some(message),
            _ => None,
        }
    }
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Issues monotonically increasing tokens and remembers the latest one.
#[derive(Debug, Default)]
pub struct RequestTracker {
    current: u64,
}

impl RequestTracker {
    /// Issues a new token, superseding every earlier one.
    pub const fn issue(&mut self) -> RequestToken {
        self.current = self.current.wrapping_add(1);
        RequestToken(self.current)
    }

    /// Supersedes every issued token without starting a request.
    pub const fn invalidate(&mut self) {
        self.current = self.current.wrapping_add(1);
    }

    /// Returns `true` if `token` is the latest issued token.
    #[must_use]
    pub const fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.current
    }
}

/// Page position within a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-based).
    pub page: u32,
    /// Total pages reported by the API (at least 1).
    pub total_pages: u32,
}

impl Pagination {
    /// Creates a pagination value. A total of 0 is treated as a single page.
    #[must_use]
    pub fn new(page: u32, total_pages: u32) -> Self {
        Self {
            page: page.max(1),
            total_pages: total_pages.max(1),
        }
    }

    /// Returns `true` if a previous page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Returns `true` if a next page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Returns the previous page number, if any.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn previous(&self) -> Option<u32> {
        if self.has_previous() {
            Some(self.page - 1)
        } else {
            None
        }
    }

    /// Returns the next page number, if any.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn next(&self) -> Option<u32> {
        if self.has_next() {
            Some(self.page + 1)
        } else {
            None
        }
    }
}

/// The controller behind the active view.
#[derive(Debug)]
pub enum Screen {
    /// Home overview.
    Home(HomeController),
    /// Popular or top rated listing.
    Listing(ListingController),
    /// Search results.
    Search(SearchController),
    /// Movie detail page.
    Details(DetailsController),
}

/// A request ticket for whichever controller is active.
#[derive(Debug, Clone)]
pub enum Fetch {
    /// Home sections.
    Home(HomeRequest),
    /// Listing page.
    Listing(ListingRequest),
    /// Search page.
    Search(SearchRequest),
    /// Movie detail.
    Details(DetailsRequest),
}

/// A completed request, tagged with the token it was issued under.
#[derive(Debug)]
pub enum Outcome {
    /// Home sections.
    Home(RequestToken, Result<HomeData>),
    /// Listing page.
    Listing(RequestToken, Result<PageResult<MovieSummary>>),
    /// Search page.
    Search(RequestToken, Result<PageResult<MovieSummary>>),
    /// Movie detail.
    Details(RequestToken, Result<MovieDetail>),
}

impl Fetch {
    /// Sends the request and tags the result with its token.
    pub async fn run<A: TmdbApi>(self, api: &A) -> Outcome {
        match self {
            Self::Home(request) => Outcome::Home(request.token, request.send(api).await),
            Self::Listing(request) => Outcome::Listing(request.token, request.send(api).await),
            Self::Search(request) => Outcome::Search(request.token, request.send(api).await),
            Self::Details(request) => Outcome::Details(request.token, request.send(api).await),
        }
    }
}

impl Screen {
    /// Creates a fresh controller for `route`.
    #[must_use]
    pub fn for_route(route: &Route) -> Self {
        match route {
            Route::Home => Self::Home(HomeController::new()),
            Route::Popular => Self::Listing(ListingController::new(Listing::Popular)),
            Route::TopRated => Self::Listing(ListingController::new(Listing::TopRated)),
            Route::Search { query } => {
                let mut controller = SearchController::new();
                controller.set_query(query);
                Self::Search(controller)
            }
            Route::Movie { id } => Self::Details(DetailsController::new(*id)),
        }
    }

    /// Starts a fetch for the current parameters.
    ///
    /// Returns `None` when the controller settles without the network
    /// (blank search, missing movie id).
    pub fn begin(&mut self) -> Option<Fetch> {
        match self {
            Self::Home(c) => Some(Fetch::Home(c.begin())),
            Self::Listing(c) => Some(Fetch::Listing(c.begin())),
            Self::Search(c) => c.begin().map(Fetch::Search),
            Self::Details(c) => c.begin().map(Fetch::Details),
        }
    }

    /// Applies an outcome. Returns `false` if it was stale or belongs to
    /// a different kind of view.
    pub fn finish(&mut self, outcome: Outcome) -> bool {
        match (self, outcome) {
            (Self::Home(c), Outcome::Home(token, result)) => c.finish(token, result),
            (Self::Listing(c), Outcome::Listing(token, result)) => c.finish(token, result),
            (Self::Search(c), Outcome::Search(token, result)) => c.finish(token, result),
            (Self::Details(c), Outcome::Details(token, result)) => c.finish(token, result),
            _ => {
                tracing::debug!("discarding response for another view");
                false
            }
        }
    }

    /// Fetches and applies data for the current parameters.
    pub async fn load<A: TmdbApi>(&mut self, api: &A) {
        if let Some(fetch) = self.begin() {
            let outcome = fetch.run(api).await;
            self.finish(outcome);
        }
    }

    /// Moves a paginated view to the next page. Returns `true` if it moved.
    pub fn next_page(&mut self) -> bool {
        match self {
            Self::Listing(c) => c.next_page(),
            Self::Search(c) => c.next_page(),
            Self::Home(_) | Self::Details(_) => false,
        }
    }

    /// Moves a paginated view to the previous page. Returns `true` if it moved.
    pub fn previous_page(&mut self) -> bool {
        match self {
            Self::Listing(c) => c.previous_page(),
            Self::Search(c) => c.previous_page(),
            Self::Home(_) | Self::Details(_) => false,
        }
    }

    /// Jumps a paginated view to `page`. Returns `true` if the page changed.
    pub fn set_page(&mut self, page: u32) -> bool {
        match self {
            Self::Listing(c) => c.set_page(page),
            Self::Search(c) => c.set_page(page),
            Self::Home(_) | Self::Details(_) => false,
        }
    }
}


#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::fake::{Failure, FakeApi};
    use super::*;

    #[test]
    fn test_tracker_supersedes_older_tokens() {
        // Arrange
        let mut tracker = RequestTracker::default();

        // Act
        let first = tracker.issue();
        let second = tracker.issue();

        // Assert
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[test]
    fn test_tracker_invalidate() {
        // Arrange
        let mut tracker = RequestTracker::default();
        let token = tracker.issue();

        // Act
        tracker.invalidate();

        // Assert
        assert!(!tracker.is_current(token));
    }

    #[test]
    fn test_pagination_bounds() {
        // Arrange & Act
        let first = Pagination::new(1, 5);
        let middle = Pagination::new(3, 5);
        let last = Pagination::new(5, 5);

        // Assert
        assert!(!first.has_previous());
        assert!(first.has_next());
        assert_eq!(middle.previous(), Some(2));
        assert_eq!(middle.next(), Some(4));
        assert!(last.has_previous());
        assert!(!last.has_next());
        assert_eq!(last.next(), None);
    }

    #[test]
    fn test_pagination_zero_total_is_single_page() {
        // Arrange & Act
        let pagination = Pagination::new(1, 0);

        // Assert
        assert_eq!(pagination.total_pages, 1);
        assert!(!pagination.has_next());
        assert!(!pagination.has_previous());
    }

    #[test]
    fn test_load_state_accessors() {
        // Arrange
        let loaded: LoadState<u32> = LoadState::Loaded(7);
        let errored: LoadState<u32> = LoadState::Errored(String::from("boom"));

        // Act & Assert
        assert_eq!(LoadState::<u32>::default(), LoadState::Idle);
        assert_eq!(loaded.data(), Some(&7));
        assert_eq!(errored.error(), Some("boom"));
        assert!(LoadState::<u32>::Loading.is_loading());
    }

    #[test]
    fn test_screen_for_route() {
        // Arrange & Act & Assert
        assert!(matches!(Screen::for_route(&Route::Home), Screen::Home(_)));
        assert!(matches!(
            Screen::for_route(&Route::TopRated),
            Screen::Listing(c) if c.listing() == Listing::TopRated
        ));
        assert!(matches!(
            Screen::for_route(&Route::search("alien")),
            Screen::Search(c) if c.query() == "alien"
        ));
        assert!(matches!(
            Screen::for_route(&Route::movie(27_205)),
            Screen::Details(c) if c.movie_id() == Some(27_205)
        ));
    }

    #[tokio::test]
    async fn test_screen_load_popular() {
        // Arrange
        let api = FakeApi::new();
        let mut screen = Screen::for_route(&Route::Popular);

        // Act
        screen.load(&api).await;

        // Assert
        assert_eq!(api.calls(), vec!["popular:1"]);
        let Screen::Listing(controller) = screen else {
            panic!("expected listing screen");
        };
        assert_eq!(controller.state().data().map(Vec::len), Some(20));
    }

    #[tokio::test]
    async fn test_screen_rejects_outcome_for_other_view() {
        // Arrange
        let api = FakeApi::new();
        let mut home = Screen::for_route(&Route::Home);
        let mut popular = Screen::for_route(&Route::Popular);
        let fetch = popular.begin().unwrap();

        // Act
        let outcome = fetch.run(&api).await;
        let applied = home.finish(outcome);

        // Assert
        assert!(!applied);
        assert!(matches!(home, Screen::Home(c) if *c.state() == LoadState::Idle));
    }

    #[tokio::test]
    async fn test_screen_blank_search_skips_network() {
        // Arrange
        let api = FakeApi::failing(Failure::Transport);
        let mut screen = Screen::for_route(&Route::search("   "));

        // Act
        screen.load(&api).await;

        // Assert
        assert!(api.calls().is_empty());
        assert!(matches!(screen, Screen::Search(c) if c.state().data().is_some_and(Vec::is_empty)));
    }

    #[test]
    fn test_screen_paging_only_for_paginated_views() {
        // Arrange
        let mut home = Screen::for_route(&Route::Home);
        let mut details = Screen::for_route(&Route::movie(1));

        // Act & Assert
        assert!(!home.next_page());
        assert!(!details.set_page(4));
    }
}
