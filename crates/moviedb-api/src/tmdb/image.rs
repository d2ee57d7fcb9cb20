//! TMDB image CDN URL construction.

/// Base URL of the TMDB image CDN (size token and path are appended).
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Image shown when a movie or person has no artwork.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/500x750?text=No+Image";

/// Builds a CDN URL for an image path such as a poster or a profile.
///
/// Returns [`PLACEHOLDER_IMAGE_URL`] when `path` is `None` or empty.
/// TMDB paths start with `/`; a path without one gets it inserted.
///
/// ```
/// use moviedb_api::tmdb::image_url;
///
/// assert_eq!(
///     image_url(Some("/abc.jpg"), "w500"),
///     "https://image.tmdb.org/t/p/w500/abc.jpg"
/// );
/// ```
#[must_use]
pub fn image_url(path: Option<&str>, size: &str) -> String {
    match path {
        Some(p) if !p.is_empty() => {
            let separator = if p.starts_with('/') { "" } else { "/" };
            format!("{IMAGE_BASE_URL}/{size}{separator}{p}")
        }
        _ => String::from(PLACEHOLDER_IMAGE_URL),
    }
}
