//! Error types for the Spotify provider

use thiserror::Error;

/// Spotify provider errors
#[derive(Error, Debug)]
pub enum SpotifyError {
    /// Token invalid or expired; fatal for the whole run
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// API request returned an error status
    #[error("Spotify API error (status {status_code}): {message}")]
    ApiError { status_code: u16, message: String },

    /// Rate limit exceeded after the transport layer's retries
    #[error("Rate limit exceeded, retry after {retry_after_seconds} seconds")]
    RateLimitExceeded { retry_after_seconds: u64 },

    /// Failed to parse an API response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Caller passed more items than one add call may carry
    #[error("Too many tracks for one add call: {count} > {limit}")]
    TooManyTracks { count: usize, limit: usize },
}

/// Result type for Spotify operations
pub type Result<T> = std::result::Result<T, SpotifyError>;

impl From<SpotifyError> for bridge_traits::BridgeError {
    fn from(error: SpotifyError) -> Self {
        match error {
            SpotifyError::Unauthorized(msg) => bridge_traits::BridgeError::Unauthorized(msg),
            other => bridge_traits::BridgeError::OperationFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::BridgeError;

    #[test]
    fn test_error_display() {
        let error = SpotifyError::ApiError {
            status_code: 404,
            message: "Playlist not found".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Spotify API error (status 404): Playlist not found"
        );
    }

    #[test]
    fn test_unauthorized_maps_to_bridge_unauthorized() {
        let bridge: BridgeError = SpotifyError::Unauthorized("expired".to_string()).into();
        assert!(bridge.is_unauthorized());

        let bridge: BridgeError = SpotifyError::ApiError {
            status_code: 500,
            message: "oops".to_string(),
        }
        .into();
        assert!(!bridge.is_unauthorized());
    }
}
