//! Plain-text rendering of page controllers.
//!
//! Pure functions of already-fetched state; nothing here touches the network.

pub mod detail;
pub mod list;

use crate::pages::details::{DetailsController, NOT_FOUND_MESSAGE};
use crate::pages::home::HomeController;
use crate::pages::listing::ListingController;
use crate::pages::search::SearchController;
use crate::pages::{LoadState, Screen};
use crate::route::Route;

use self::detail::detail_sheet;
use self::list::{LOADING_TEXT, movie_list, pagination_bar};

/// Recovery action offered on error pages.
pub const GO_HOME_TEXT: &str = "Go Back Home: /";

/// Tagline under the home heading.
pub const HOME_SUBTITLE: &str = "Discover millions of movies, TV shows and people. Explore now.";

/// Shown on the search page before anything is typed.
pub const SEARCH_PROMPT: &str = "Start searching for movies";

/// Hint under [`SEARCH_PROMPT`].
pub const SEARCH_HINT: &str = "Use the search bar above to find your favorite movies";

/// Renders the page for `route` from its controller.
#[must_use]
pub fn render_page(route: &Route, screen: &Screen) -> Vec<String> {
    let mut lines = vec![route.title()];
    match screen {
        Screen::Home(c) => render_home(c, &mut lines),
        Screen::Listing(c) => render_listing(c, &mut lines),
        Screen::Search(c) => render_search(c, &mut lines),
        Screen::Details(c) => render_details(c, &mut lines),
    }
    lines
}

fn render_home(controller: &HomeController, lines: &mut Vec<String>) {
    lines.push(String::from(HOME_SUBTITLE));
    lines.push(String::new());
    match controller.state() {
        LoadState::Idle | LoadState::Loading => lines.push(String::from(LOADING_TEXT)),
        LoadState::Errored(message) => lines.push(message.clone()),
        LoadState::Loaded(data) => {
            lines.push(String::from("Trending Today"));
            lines.extend(movie_list(data.trending_preview()));
            lines.push(String::new());
            lines.push(String::from("Popular Movies (View All: /popular)"));
            lines.extend(movie_list(data.popular_preview()));
        }
    }
}

fn render_listing(controller: &ListingController, lines: &mut Vec<String>) {
    match controller.state() {
        LoadState::Idle | LoadState::Loading => lines.push(String::from(LOADING_TEXT)),
        LoadState::Errored(message) => {
            lines.push(message.clone());
            lines.push(String::from(GO_HOME_TEXT));
        }
        LoadState::Loaded(movies) => {
            lines.extend(movie_list(movies));
            if !movies.is_empty() {
                lines.push(String::new());
                lines.push(pagination_bar(&controller.pagination()));
            }
        }
    }
}

fn render_search(controller: &SearchController, lines: &mut Vec<String>) {
    if controller.is_blank() {
        lines.push(String::from(SEARCH_PROMPT));
        lines.push(String::from(SEARCH_HINT));
        return;
    }
    match controller.state() {
        LoadState::Idle | LoadState::Loading => lines.push(String::from(LOADING_TEXT)),
        LoadState::Errored(message) => {
            lines.push(message.clone());
            lines.push(String::from(GO_HOME_TEXT));
        }
        LoadState::Loaded(movies) => {
            lines.extend(movie_list(movies));
            if !movies.is_empty() {
                lines.push(String::new());
                lines.push(pagination_bar(&controller.pagination()));
            }
        }
    }
}

fn render_details(controller: &DetailsController, lines: &mut Vec<String>) {
    if controller.movie_id().is_none() {
        lines.push(String::from(NOT_FOUND_MESSAGE));
        lines.push(String::from(GO_HOME_TEXT));
        return;
    }
    match controller.state() {
        LoadState::Idle | LoadState::Loading => lines.push(String::from(LOADING_TEXT)),
        LoadState::Errored(message) => {
            lines.push(message.clone());
            lines.push(String::from(GO_HOME_TEXT));
        }
        LoadState::Loaded(detail) => lines.extend(detail_sheet(detail)),
    }
}
