//! Movie detail page.

use anyhow::Result;
use moviedb_api::tmdb::{CastMember, MovieDetail, TmdbApi};

use super::{LoadState, RequestToken, RequestTracker};

/// Cast members shown on the detail page.
pub const CAST_LIMIT: usize = 6;

/// Message shown when the detail request fails.
pub const DETAILS_ERROR_MESSAGE: &str = "Failed to load movie details";

/// Message shown when there is no movie to display.
pub const NOT_FOUND_MESSAGE: &str = "Movie not found";

/// Request ticket for one movie.
#[derive(Debug, Clone)]
pub struct DetailsRequest {
    /// Token the outcome is applied under.
    pub token: RequestToken,
    /// TMDB movie ID.
    pub movie_id: u64,
}

impl DetailsRequest {
    /// Fetches the movie with credits and videos.
    ///
    /// # Errors
    ///
    /// Returns an error if the API call fails.
    pub async fn send<A: TmdbApi>(&self, api: &A) -> Result<MovieDetail> {
        api.movie_details(self.movie_id).await
    }
}

/// Controller for the detail page.
#[derive(Debug, Default)]
pub struct DetailsController {
    movie_id: Option<u64>,
    state: LoadState<MovieDetail>,
    tracker: RequestTracker,
}

impl DetailsController {
    /// Creates an idle controller. `None` never fetches.
    #[must_use]
    pub fn new(movie_id: Option<u64>) -> Self {
        Self {
            movie_id,
            ..Self::default()
        }
    }

    /// Movie being shown.
    #[must_use]
    pub const fn movie_id(&self) -> Option<u64> {
        self.movie_id
    }

    /// Current load state.
    #[must_use]
    pub const fn state(&self) -> &LoadState<MovieDetail> {
        &self.state
    }

    /// Switches to another movie. Returns `true` if the id changed.
    ///
    /// Any change drops back to idle and supersedes the request in flight,
    /// so the previous movie is never shown under the new id.
    pub fn set_movie_id(&mut self, movie_id: Option<u64>) -> bool {
        if movie_id == self.movie_id {
            return false;
        }
        self.movie_id = movie_id;
        self.tracker.invalidate();
        self.state = LoadState::Idle;
        true
    }

    /// Issues a request ticket, or `None` when there is no id.
    pub fn begin(&mut self) -> Option<DetailsRequest> {
        let movie_id = self.movie_id?;
        self.state = LoadState::Loading;
        Some(DetailsRequest {
            token: self.tracker.issue(),
            movie_id,
        })
    }

    /// Applies a result. Returns `false` if `token` is stale.
    pub fn finish(&mut self, token: RequestToken, result: Result<MovieDetail>) -> bool {
        if !self.tracker.is_current(token) {
            tracing::debug!(movie_id = ?self.movie_id, "discarding stale movie details response");
            return false;
        }
        self.state = match result {
            Ok(detail) => LoadState::Loaded(detail),
            Err(err) => {
                tracing::warn!(
                    movie_id = ?self.movie_id,
                    error = %err,
                    "failed to load movie details"
                );
                LoadState::Errored(String::from(DETAILS_ERROR_MESSAGE))
            }
        };
        true
    }

    /// Fetches and applies the movie, if an id is set.
    pub async fn load<A: TmdbApi>(&mut self, api: &A) {
        if let Some(request) = self.begin() {
            let result = request.send(api).await;
            self.finish(request.token, result);
        }
    }
}

/// First [`CAST_LIMIT`] cast members in billing order.
#[must_use]
pub fn cast_preview(detail: &MovieDetail) -> &[CastMember] {
    let cast = detail.credits.cast.as_slice();
    cast.get(..CAST_LIMIT).unwrap_or(cast)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::super::fake::{Failure, FakeApi, inception};
    use super::*;

    #[tokio::test]
    async fn test_load_fetches_movie() {
        // Arrange
        let api = FakeApi::new();
        let mut controller = DetailsController::new(Some(27_205));

        // Act
        controller.load(&api).await;

        // Assert
        assert_eq!(api.calls(), vec!["details:27205"]);
        let detail = controller.state().data().unwrap();
        assert_eq!(detail.title, "Inception");
    }

    #[tokio::test]
    async fn test_missing_id_never_fetches() {
        // Arrange
        let api = FakeApi::new();
        let mut controller = DetailsController::new(None);

        // Act
        controller.load(&api).await;

        // Assert
        assert!(api.calls().is_empty());
        assert!(matches!(controller.state(), LoadState::Idle));
    }

    #[tokio::test]
    async fn test_not_found_sets_error_message() {
        // Arrange
        let api = FakeApi::failing(Failure::NotFound);
        let mut controller = DetailsController::new(Some(999_999_999));

        // Act
        controller.load(&api).await;

        // Assert
        assert_eq!(controller.state().error(), Some(DETAILS_ERROR_MESSAGE));
    }

    #[test]
    fn test_clearing_id_supersedes_in_flight_request() {
        // Arrange
        let mut controller = DetailsController::new(Some(27_205));
        let request = controller.begin().unwrap();

        // Act
        let changed = controller.set_movie_id(None);
        let applied = controller.finish(request.token, Ok(inception()));

        // Assert
        assert!(changed);
        assert!(!applied);
        assert!(matches!(controller.state(), LoadState::Idle));
    }

    #[test]
    fn test_switching_movie_drops_previous_response() {
        // Arrange
        let mut controller = DetailsController::new(Some(1));
        let first = controller.begin().unwrap();
        controller.set_movie_id(Some(27_205));
        let second = controller.begin().unwrap();

        // Act
        controller.finish(second.token, Ok(inception()));
        let applied_first = controller.finish(first.token, Err(anyhow::anyhow!("late")));

        // Assert
        assert!(!applied_first);
        assert_eq!(controller.state().data().unwrap().id, 27_205);
    }

    #[test]
    fn test_new_id_clears_previous_movie() {
        // Arrange
        let mut controller = DetailsController::new(Some(27_205));
        let request = controller.begin().unwrap();
        controller.finish(request.token, Ok(inception()));
        let late = controller.begin().unwrap();

        // Act
        let changed = controller.set_movie_id(Some(155));
        let applied = controller.finish(late.token, Ok(inception()));

        // Assert
        assert!(changed);
        assert!(!applied);
        assert_eq!(controller.movie_id(), Some(155));
        assert!(matches!(controller.state(), LoadState::Idle));
    }

    #[test]
    fn test_cast_preview_limit() {
        // Arrange
        let detail = inception();

        // Act
        let cast = cast_preview(&detail);

        // Assert
        assert_eq!(detail.credits.cast.len(), 8);
        assert_eq!(cast.len(), CAST_LIMIT);
        assert_eq!(cast[0].name, "Leonardo DiCaprio");
    }

    #[test]
    fn test_cast_preview_short_cast() {
        // Arrange
        let mut detail = inception();
        detail.credits.cast.truncate(2);

        // Act & Assert
        assert_eq!(cast_preview(&detail).len(), 2);
    }
}
