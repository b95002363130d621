//! Geocoding error types

use thiserror::Error;

/// Errors that can occur during reverse geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Client configuration is invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Connection to the geocoding service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// The geocoding service answered with a non-success HTTP status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the response from the geocoding service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The provider reported a failure status in the response body
    #[error("{info}({infocode})")]
    Provider {
        /// Human-readable provider message
        info: String,
        /// Provider status code
        infocode: String,
    },

    /// The administrative division code is not exactly six characters
    #[error("address code invalid")]
    InvalidAdcode {
        /// The rejected code as received
        adcode: String,
    },

    /// Province, city, or district is still empty after fallback
    #[error("administrative region invalid")]
    InvalidRegion,
}

impl GeocodingError {
    /// Returns true if this error is transient and the call may be retried
    ///
    /// The client itself never retries; this classifies failures for the
    /// caller's retry policy.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::Timeout | Self::RequestFailed(_)
        )
    }
}
