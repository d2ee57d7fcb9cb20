//! TMDB client error taxonomy.

use std::fmt;

/// HTTP status TMDB answers with when the API key is missing or invalid.
const UNAUTHORIZED: u16 = 401;

/// HTTP status TMDB answers with for an unknown resource.
const NOT_FOUND: u16 = 404;

/// Errors raised by `TmdbClient`.
///
/// Returned wrapped in `anyhow::Error`; callers recover the variant with
/// `downcast_ref` or [`upstream_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum TmdbError {
    /// The API answered with a non-2xx status.
    Upstream {
        /// HTTP status code.
        status: u16,
        /// TMDB `status_message`, or the raw body when it is not a TMDB error object.
        message: String,
    },
    /// The request never reached the API or no response came back.
    Transport(String),
    /// The response body did not match the expected shape.
    Decode(String),
}

impl TmdbError {
    /// Returns the HTTP status for upstream errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Returns `true` when the API rejected the credential.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(UNAUTHORIZED))
    }

    /// Returns `true` when the requested resource does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(NOT_FOUND))
    }
}

impl fmt::Display for TmdbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upstream { status, message } => {
                write!(f, "TMDB API error (HTTP {status}): {message}")
            }
            Self::Transport(msg) => write!(f, "TMDB API unreachable: {msg}"),
            Self::Decode(msg) => write!(f, "failed to decode TMDB response: {msg}"),
        }
    }
}

impl std::error::Error for TmdbError {}

/// Finds the upstream HTTP status anywhere in an error chain.
#[must_use]
pub fn upstream_status(err: &anyhow::Error) -> Option<u16> {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<TmdbError>())
        .and_then(TmdbError::status)
}

#[cfg(test)]
mod tests {
    use anyhow::Context;

    use super::*;

    #[test]
    fn test_upstream_status_through_context() {
        // Arrange
        let result: anyhow::Result<()> = Err(TmdbError::Upstream {
            status: 401,
            message: String::from("Invalid API key"),
        })
        .context("popular movies request failed");

        // Act
        let status = result.err().as_ref().and_then(upstream_status);

        // Assert
        assert_eq!(status, Some(401));
    }

    #[test]
    fn test_transport_has_no_status() {
        // Arrange
        let err = anyhow::Error::new(TmdbError::Transport(String::from("connection refused")));

        // Act & Assert
        assert_eq!(upstream_status(&err), None);
    }

    #[test]
    fn test_unrelated_error_has_no_status() {
        // Arrange
        let err = anyhow::anyhow!("something else");

        // Act & Assert
        assert_eq!(upstream_status(&err), None);
    }

    #[test]
    fn test_status_predicates() {
        // Arrange
        let unauthorized = TmdbError::Upstream {
            status: 401,
            message: String::new(),
        };
        let not_found = TmdbError::Upstream {
            status: 404,
            message: String::new(),
        };

        // Act & Assert
        assert!(unauthorized.is_unauthorized());
        assert!(!unauthorized.is_not_found());
        assert!(not_found.is_not_found());
        assert!(!TmdbError::Decode(String::new()).is_unauthorized());
    }

    #[test]
    fn test_display_upstream() {
        // Arrange
        let err = TmdbError::Upstream {
            status: 500,
            message: String::from("boom"),
        };

        // Act & Assert
        assert_eq!(err.to_string(), "TMDB API error (HTTP 500): boom");
    }
}
