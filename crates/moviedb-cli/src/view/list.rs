//! Movie cards, card lists and pagination controls.

use moviedb_api::tmdb::MovieSummary;

use crate::pages::Pagination;

/// Placeholder for a missing rating or year.
pub const NOT_AVAILABLE: &str = "N/A";

/// Line shown while a request is in flight.
pub const LOADING_TEXT: &str = "Loading...";

/// Line shown for an empty result.
pub const EMPTY_TEXT: &str = "No movies found";

/// Formats a vote average with one decimal, or `N/A` when absent.
#[must_use]
pub fn format_rating(vote_average: Option<f64>) -> String {
    vote_average.map_or_else(|| String::from(NOT_AVAILABLE), |v| format!("{v:.1}"))
}

/// One-line card: `Inception ⭐ 8.4 (2010)`.
#[must_use]
pub fn movie_card(movie: &MovieSummary) -> String {
    format!(
        "{} ⭐ {} ({})",
        movie.title,
        format_rating(movie.vote_average),
        movie.release_year().unwrap_or(NOT_AVAILABLE)
    )
}

/// Numbered cards in upstream order, or the empty state.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn movie_list(movies: &[MovieSummary]) -> Vec<String> {
    if movies.is_empty() {
        return vec![String::from(EMPTY_TEXT)];
    }
    movies
        .iter()
        .enumerate()
        .map(|(i, movie)| format!("{:>2}. {} [/movie/{}]", i + 1, movie_card(movie), movie.id))
        .collect()
}

/// Pagination controls. Unavailable directions are left out.
#[must_use]
pub fn pagination_bar(pagination: &Pagination) -> String {
    let mut parts = Vec::with_capacity(3);
    if pagination.has_previous() {
        parts.push(String::from("< Previous"));
    }
    parts.push(format!(
        "Page {} of {}",
        pagination.page, pagination.total_pages
    ));
    if pagination.has_next() {
        parts.push(String::from("Next >"));
    }
    parts.join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(
        title: &str,
        vote_average: Option<f64>,
        release_date: Option<&str>,
    ) -> MovieSummary {
        MovieSummary {
            id: 27_205,
            title: String::from(title),
            poster_path: None,
            vote_average,
            release_date: release_date.map(String::from),
        }
    }

    #[test]
    fn test_card_with_rating_and_year() {
        // Arrange
        let movie = summary("Inception", Some(8.369), Some("2010-07-15"));

        // Act & Assert
        assert_eq!(movie_card(&movie), "Inception ⭐ 8.4 (2010)");
    }

    #[test]
    fn test_card_without_rating_or_year() {
        // Arrange
        let movie = summary("Untitled", None, None);

        // Act & Assert
        assert_eq!(movie_card(&movie), "Untitled ⭐ N/A (N/A)");
    }

    #[test]
    fn test_card_with_zero_rating() {
        // Arrange
        let movie = summary("Unrated", Some(0.0), Some("2025-12-19"));

        // Act & Assert
        assert_eq!(movie_card(&movie), "Unrated ⭐ 0.0 (2025)");
    }

    #[test]
    fn test_list_keeps_order() {
        // Arrange
        let movies = vec![
            summary("B", Some(7.0), Some("2001-01-01")),
            summary("A", Some(6.0), Some("2002-01-01")),
        ];

        // Act
        let lines = movie_list(&movies);

        // Assert
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 1. B ⭐ 7.0 (2001)"));
        assert!(lines[1].starts_with(" 2. A ⭐ 6.0 (2002)"));
        assert!(lines[1].ends_with("[/movie/27205]"));
    }

    #[test]
    fn test_empty_list() {
        // Arrange & Act & Assert
        assert_eq!(movie_list(&[]), vec![EMPTY_TEXT]);
    }

    #[test]
    fn test_pagination_bar_first_page() {
        // Arrange & Act & Assert
        assert_eq!(
            pagination_bar(&Pagination::new(1, 3)),
            "Page 1 of 3 | Next >"
        );
    }

    #[test]
    fn test_pagination_bar_middle_page() {
        // Arrange & Act & Assert
        assert_eq!(
            pagination_bar(&Pagination::new(2, 3)),
            "< Previous | Page 2 of 3 | Next >"
        );
    }

    #[test]
    fn test_pagination_bar_last_page() {
        // Arrange & Act & Assert
        assert_eq!(
            pagination_bar(&Pagination::new(3, 3)),
            "< Previous | Page 3 of 3"
        );
    }
}
