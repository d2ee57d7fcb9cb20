//! Navigation locations.
//!
//! Five views are addressable: `/`, `/popular`, `/top-rated`,
//! `/search?q=<query>` and `/movie/<id>`.

use std::fmt;

use anyhow::{Context, Result, bail};
use url::Url;
use url::form_urlencoded;

/// Base used to resolve relative locations.
const LOCATION_BASE: &str = "http://moviedb.local/";

/// A navigable view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Trending and popular overview.
    Home,
    /// Popular movie listing.
    Popular,
    /// Top rated movie listing.
    TopRated,
    /// Search results for `query` (may be empty).
    Search {
        /// Value of the `q` parameter.
        query: String,
    },
    /// Movie detail page. `None` when the id segment is missing or not a number.
    Movie {
        /// TMDB movie ID.
        id: Option<u64>,
    },
}

impl Route {
    /// Parses a location such as `/search?q=alien` or `/movie/27205`.
    ///
    /// # Errors
    ///
    /// Returns an error if the location is not a URL path or names an
    /// unknown view.
    pub fn parse(location: &str) -> Result<Self> {
        let base = Url::parse(LOCATION_BASE).context("invalid location base")?;
        let url = base
            .join(location.trim())
            .with_context(|| format!("invalid location: {location}"))?;

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [] => Ok(Self::Home),
            ["popular"] => Ok(Self::Popular),
            ["top-rated"] => Ok(Self::TopRated),
            ["search"] => {
                let query = url
                    .query_pairs()
                    .find(|(key, _)| key == "q")
                    .map(|(_, value)| value.into_owned())
                    .unwrap_or_default();
                Ok(Self::Search { query })
            }
            ["movie"] => Ok(Self::Movie { id: None }),
            ["movie", id] => Ok(Self::Movie {
                id: id.parse().ok(),
            }),
            _ => bail!("unknown location: {location}"),
        }
    }

    /// Builds the search location for a query.
    #[must_use]
    pub fn search(query: &str) -> Self {
        Self::Search {
            query: String::from(query),
        }
    }

    /// Builds the detail location for a movie.
    #[must_use]
    pub const fn movie(id: u64) -> Self {
        Self::Movie { id: Some(id) }
    }

    /// Returns the location string for this route.
    #[must_use]
    pub fn location(&self) -> String {
        match self {
            Self::Home => String::from("/"),
            Self::Popular => String::from("/popular"),
            Self::TopRated => String::from("/top-rated"),
            Self::Search { query } => {
                let encoded = form_urlencoded::Serializer::new(String::new())
                    .append_pair("q", query)
                    .finish();
                format!("/search?{encoded}")
            }
            Self::Movie { id: Some(id) } => format!("/movie/{id}"),
            Self::Movie { id: None } => String::from("/movie"),
        }
    }

    /// Returns the page heading for this route.
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::Home => String::from("Welcome to MovieDB"),
            Self::Popular => String::from("Popular Movies"),
            Self::TopRated => String::from("Top Rated Movies"),
            Self::Search { query } if query.trim().is_empty() => String::from("Search Movies"),
            Self::Search { query } => format!("Search Results for \"{query}\""),
            Self::Movie { .. } => String::from("Movie Details"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.location())
    }
}
