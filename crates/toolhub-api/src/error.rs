//! Internal error types for catalog API operations.
//!
//! These errors are internal to `toolhub-api` and are mapped to core port
//! errors at the boundary.

use thiserror::Error;

/// Result type alias for catalog API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors related to catalog API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success HTTP status.
    #[error("Catalog API request failed with status {status}: {url}")]
    Status {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The envelope said `success: false`.
    #[error("{message}")]
    Application {
        /// Message from the server, or a generic one when it sent none
        message: String,
    },

    /// The response had a shape we can't work with.
    #[error("Invalid response from catalog API: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
