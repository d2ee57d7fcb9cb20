//! Browser state: current route, its controller, history and selection.

use moviedb_api::tmdb::MovieSummary;

use crate::pages::{Fetch, LoadState, Outcome, Screen};
use crate::route::Route;

/// TMDB web page for a movie.
pub const TMDB_MOVIE_URL: &str = "https://www.themoviedb.org/movie";

/// Input mode for the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Normal navigation mode.
    Normal,
    /// Search text input mode.
    Search,
}

/// A fetch to spawn, stamped with the screen generation it belongs to.
#[derive(Debug)]
pub struct Dispatch {
    /// Screen generation at dispatch time.
    pub generation: u64,
    /// The request ticket.
    pub fetch: Fetch,
}

/// A finished fetch on its way back to the browser.
#[derive(Debug)]
pub struct Reply {
    /// Screen generation the fetch was dispatched under.
    pub generation: u64,
    /// The tagged result.
    pub outcome: Outcome,
}

/// State of the terminal browser.
#[derive(Debug)]
pub struct App {
    route: Route,
    screen: Screen,
    history: Vec<Route>,
    generation: u64,
    selected: usize,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Search text being typed.
    pub search_input: String,
}

impl App {
    /// Opens `route` and returns its first fetch.
    #[must_use]
    pub fn new(route: Route) -> (Self, Option<Dispatch>) {
        let mut app = Self {
            screen: Screen::for_route(&route),
            route,
            history: Vec::new(),
            generation: 0,
            selected: 0,
            input_mode: InputMode::Normal,
            search_input: String::new(),
        };
        let dispatch = app.begin();
        (app, dispatch)
    }

    /// Current route.
    #[must_use]
    pub const fn route(&self) -> &Route {
        &self.route
    }

    /// Controller of the current route.
    #[must_use]
    pub const fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Index of the selected movie in [`App::movies`].
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Returns `true` if there is a route to go back to.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Navigates to `route`, remembering the current one.
    ///
    /// Navigating to the current route is a no-op.
    pub fn navigate(&mut self, route: Route) -> Option<Dispatch> {
        if route == self.route {
            return None;
        }
        let previous = std::mem::replace(&mut self.route, route);
        self.history.push(previous);
        self.enter()
    }

    /// Returns to the previous route. Returns `None` if there was nothing to
    /// go back to or the previous view needs no fetch.
    pub fn back(&mut self) -> Option<Dispatch> {
        let previous = self.history.pop()?;
        self.route = previous;
        self.enter()
    }

    /// Moves a paginated view forward one page.
    pub fn next_page(&mut self) -> Option<Dispatch> {
        if self.screen.next_page() {
            self.selected = 0;
            self.begin()
        } else {
            None
        }
    }

    /// Moves a paginated view back one page.
    pub fn previous_page(&mut self) -> Option<Dispatch> {
        if self.screen.previous_page() {
            self.selected = 0;
            self.begin()
        } else {
            None
        }
    }

    /// Re-issues the fetch for the current view.
    pub fn reload(&mut self) -> Option<Dispatch> {
        self.begin()
    }

    /// Applies a finished fetch. Replies for an earlier screen are dropped.
    pub fn apply(&mut self, reply: Reply) -> bool {
        if reply.generation != self.generation {
            tracing::debug!(
                generation = reply.generation,
                current = self.generation,
                "discarding response for a previous view"
            );
            return false;
        }
        let applied = self.screen.finish(reply.outcome);
        if applied {
            self.clamp_selection();
        }
        applied
    }

    /// Movies the selection moves over, in display order.
    #[must_use]
    pub fn movies(&self) -> Vec<&MovieSummary> {
        match &self.screen {
            Screen::Home(c) => c.state().data().map_or_else(Vec::new, |data| {
                data.trending_preview()
                    .iter()
                    .chain(data.popular_preview())
                    .collect()
            }),
            Screen::Listing(c) => loaded_movies(c.state()),
            Screen::Search(c) => loaded_movies(c.state()),
            Screen::Details(_) => Vec::new(),
        }
    }

    /// Currently selected movie.
    #[must_use]
    pub fn selected_movie(&self) -> Option<&MovieSummary> {
        self.movies().get(self.selected).copied()
    }

    /// Moves the selection up.
    pub const fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Moves the selection down.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn move_down(&mut self) {
        let len = self.movies().len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    /// Opens the detail page of the selected movie.
    pub fn open_selected(&mut self) -> Option<Dispatch> {
        let id = self.selected_movie()?.id;
        self.navigate(Route::movie(id))
    }

    /// Enters search input mode, prefilled with the current query.
    pub fn start_search(&mut self) {
        self.search_input = match &self.route {
            Route::Search { query } => query.clone(),
            _ => String::new(),
        };
        self.input_mode = InputMode::Search;
    }

    /// Leaves search input mode without searching.
    pub fn cancel_search(&mut self) {
        self.search_input.clear();
        self.input_mode = InputMode::Normal;
    }

    /// Submits the typed query as a search location.
    pub fn submit_search(&mut self) -> Option<Dispatch> {
        self.input_mode = InputMode::Normal;
        let query = std::mem::take(&mut self.search_input);
        self.navigate(Route::search(query.trim()))
    }

    /// External link for the current view: the trailer on a loaded detail
    /// page, else the TMDB page of the shown or selected movie.
    #[must_use]
    pub fn external_url(&self) -> Option<String> {
        if let Screen::Details(c) = &self.screen {
            if let Some(detail) = c.state().data() {
                return Some(
                    detail
                        .trailer()
                        .and_then(|video| video.watch_url())
                        .unwrap_or_else(|| format!("{TMDB_MOVIE_URL}/{}", detail.id)),
                );
            }
            return c.movie_id().map(|id| format!("{TMDB_MOVIE_URL}/{id}"));
        }
        self.selected_movie()
            .map(|movie| format!("{TMDB_MOVIE_URL}/{}", movie.id))
    }

    /// Rebuilds the controller for the current route.
    fn enter(&mut self) -> Option<Dispatch> {
        self.generation = self.generation.wrapping_add(1);
        self.screen = Screen::for_route(&self.route);
        self.selected = 0;
        tracing::debug!(location = %self.route, "navigated");
        self.begin()
    }

    fn begin(&mut self) -> Option<Dispatch> {
        self.screen.begin().map(|fetch| Dispatch {
            generation: self.generation,
            fetch,
        })
    }

    fn clamp_selection(&mut self) {
        let len = self.movies().len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }
}

fn loaded_movies(state: &LoadState<Vec<MovieSummary>>) -> Vec<&MovieSummary> {
    state
        .data()
        .map_or_else(Vec::new, |movies| movies.iter().collect())
}
