//! TMDB API response types and request parameters.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Deserializer};

/// Base URL of the YouTube watch page used for trailers.
const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

// --- Listings ---

/// One page of a paginated TMDB listing.
///
/// Returned by `movie/popular`, `movie/top_rated`, `trending/movie/{window}`
/// and `search/movie`. Results keep the order the API sent them in.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct PageResult<T> {
    /// Current page number.
    #[serde(default = "first_page", deserialize_with = "null_as_first_page")]
    pub page: u32,
    /// Results on this page.
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    pub results: Vec<T>,
    /// Total number of pages for the query.
    #[serde(default = "first_page", deserialize_with = "null_as_first_page")]
    pub total_pages: u32,
    /// Total number of results for the query.
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_results: u32,
}

/// Serde default for page counters.
const fn first_page() -> u32 {
    1
}

/// Reads `null` as [`first_page`].
fn null_as_first_page<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Option::<u32>::deserialize(deserializer).map(|page| page.unwrap_or_else(first_page))
}

/// Reads `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A movie as it appears in list endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Vote average (`None` when missing or null).
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Release date (YYYY-MM-DD, may be empty or missing).
    #[serde(default)]
    pub release_date: Option<String>,
}

impl MovieSummary {
    /// Returns the release year parsed from `release_date`, if any.
    #[must_use]
    pub fn release_year(&self) -> Option<&str> {
        release_year(self.release_date.as_deref())
    }
}

/// Extracts the `YYYY` part of a `YYYY-MM-DD` date string.
fn release_year(date: Option<&str>) -> Option<&str> {
    date.and_then(|d| d.split('-').next())
        .filter(|year| !year.is_empty())
}

// --- Movie Details ---

/// Response from `movie/{movie_id}?append_to_response=credits,videos`.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetail {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Vote average (`None` when missing or null).
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Vote count.
    #[serde(default, deserialize_with = "null_as_default")]
    pub vote_count: u32,
    /// Release date (YYYY-MM-DD).
    #[serde(default)]
    pub release_date: Option<String>,
    /// Tagline.
    #[serde(default)]
    pub tagline: Option<String>,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Runtime in minutes.
    #[serde(default)]
    pub runtime: Option<u32>,
    /// Budget in USD (0 when unknown).
    #[serde(default, deserialize_with = "null_as_default")]
    pub budget: u64,
    /// Revenue in USD (0 when unknown).
    #[serde(default, deserialize_with = "null_as_default")]
    pub revenue: u64,
    /// Release status (e.g., "Released").
    #[serde(default)]
    pub status: Option<String>,
    /// Popularity score.
    #[serde(default, deserialize_with = "null_as_default")]
    pub popularity: f64,
    /// Genres in API order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
    /// Production companies in API order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub production_companies: Vec<ProductionCompany>,
    /// Embedded credits.
    #[serde(default, deserialize_with = "null_as_default")]
    pub credits: Credits,
    /// Embedded videos.
    #[serde(default, deserialize_with = "null_as_default")]
    pub videos: Videos,
}

impl MovieDetail {
    /// Projects the detail record onto the list-level summary shape.
    #[must_use]
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id,
            title: self.title.clone(),
            poster_path: self.poster_path.clone(),
            vote_average: self.vote_average,
            release_date: self.release_date.clone(),
        }
    }

    /// Returns the release year parsed from `release_date`, if any.
    #[must_use]
    pub fn release_year(&self) -> Option<&str> {
        release_year(self.release_date.as_deref())
    }

    /// Returns the first YouTube trailer, if the videos list has one.
    #[must_use]
    pub fn trailer(&self) -> Option<&Video> {
        self.videos
            .results
            .iter()
            .find(|v| v.site == "YouTube" && v.video_type == "Trailer")
    }
}

/// Genre entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

/// Production company entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductionCompany {
    /// Company ID.
    pub id: u64,
    /// Company name.
    pub name: String,
}

/// Credits block embedded via `append_to_response=credits`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credits {
    /// Cast in billing order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cast: Vec<CastMember>,
}

/// A single cast member.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CastMember {
    /// TMDB person ID.
    pub id: u64,
    /// Performer name.
    pub name: String,
    /// Character name.
    #[serde(default)]
    pub character: Option<String>,
    /// Profile image path.
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Videos block embedded via `append_to_response=videos`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Videos {
    /// Video entries.
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Video>,
}

/// A single video entry (trailer, teaser, clip...).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Video {
    /// Video name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Site-specific key.
    pub key: String,
    /// Hosting site (e.g., "YouTube").
    #[serde(default, deserialize_with = "null_as_default")]
    pub site: String,
    /// Video type (e.g., "Trailer", "Teaser").
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub video_type: String,
}

impl Video {
    /// Returns the watch URL for YouTube-hosted videos.
    #[must_use]
    pub fn watch_url(&self) -> Option<String> {
        (self.site == "YouTube").then(|| format!("{YOUTUBE_WATCH_URL}{}", self.key))
    }
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[allow(dead_code)]
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
}

// --- Parameters ---

/// Time window accepted by `trending/movie/{window}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeWindow {
    /// Trending today.
    #[default]
    Day,
    /// Trending this week.
    Week,
}

impl TimeWindow {
    /// Returns the path segment for this window.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            other => bail!("invalid time window: {other} (expected \"day\" or \"week\")"),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::indexing_slicing)]
    #![allow(clippy::float_cmp)]

    use super::*;

    #[test]
    fn test_summary_missing_optional_fields_default() {
        // Arrange
        let json = r#"{"id":42,"title":"Untitled"}"#;

        // Act
        let movie: MovieSummary = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(movie.id, 42);
        assert!(movie.vote_average.is_none());
        assert!(movie.poster_path.is_none());
        assert!(movie.release_year().is_none());
    }

    #[test]
    fn test_summary_null_poster_path() {
        // Arrange
        let json = r#"{"id":1,"title":"A","poster_path":null,"vote_average":6.5,"release_date":"1999-03-31"}"#;

        // Act
        let movie: MovieSummary = serde_json::from_str(json).unwrap();

        // Assert
        assert!(movie.poster_path.is_none());
        assert_eq!(movie.release_year(), Some("1999"));
    }

    #[test]
    fn test_empty_release_date_has_no_year() {
        // Arrange
        let json = r#"{"id":1,"title":"A","release_date":""}"#;

        // Act
        let movie: MovieSummary = serde_json::from_str(json).unwrap();

        // Assert
        assert!(movie.release_year().is_none());
    }

    #[test]
    fn test_page_result_defaults_total_pages() {
        // Arrange
        let json = r#"{"page":1,"results":[]}"#;

        // Act
        let page: PageResult<MovieSummary> = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_results, 0);
    }

    #[test]
    fn test_page_result_ignores_unknown_fields() {
        // Arrange
        let json = r#"{"page":3,"results":[{"id":7,"title":"X","adult":false,"genre_ids":[18]}],"total_pages":9,"total_results":170,"dates":{}}"#;

        // Act
        let page: PageResult<MovieSummary> = serde_json::from_str(json).unwrap();

        // Assert
        assert_eq!(page.page, 3);
        assert_eq!(page.results[0].id, 7);
    }

    #[test]
    fn test_detail_summary_projection() {
        // Arrange
        let json = r#"{"id":5,"title":"Five","vote_average":7.1,"release_date":"2001-01-01","budget":10}"#;
        let detail: MovieDetail = serde_json::from_str(json).unwrap();

        // Act
        let summary = detail.summary();

        // Assert
        assert_eq!(summary.id, 5);
        assert_eq!(summary.title, "Five");
        assert_eq!(summary.release_year(), Some("2001"));
        assert!(detail.credits.cast.is_empty());
    }

    #[test]
    fn test_trailer_picks_first_youtube_trailer() {
        // Arrange
        let json = r#"{"id":5,"title":"Five","videos":{"results":[
            {"name":"Teaser","key":"t1","site":"YouTube","type":"Teaser"},
            {"name":"Vimeo Trailer","key":"v1","site":"Vimeo","type":"Trailer"},
            {"name":"Official Trailer","key":"y1","site":"YouTube","type":"Trailer"}
        ]}}"#;
        let detail: MovieDetail = serde_json::from_str(json).unwrap();

        // Act
        let trailer = detail.trailer().unwrap();

        // Assert
        assert_eq!(trailer.key, "y1");
        assert_eq!(
            trailer.watch_url().as_deref(),
            Some("https://www.youtube.com/watch?v=y1")
        );
    }

    #[test]
    fn test_time_window_from_str() {
        // Arrange & Act & Assert
        assert_eq!("day".parse::<TimeWindow>().unwrap(), TimeWindow::Day);
        assert_eq!("week".parse::<TimeWindow>().unwrap(), TimeWindow::Week);
        assert!("month".parse::<TimeWindow>().is_err());
        assert_eq!(TimeWindow::default(), TimeWindow::Day);
    }
}
