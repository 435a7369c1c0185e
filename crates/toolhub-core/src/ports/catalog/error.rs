//! Error types for catalog port operations.

use thiserror::Error;

/// Errors from catalog port operations.
///
/// These are domain-level errors; HTTP and JSON details are mapped into
/// them by the adapter. Every variant is recoverable from the caller's
/// point of view: paginators turn them into an error message and an empty
/// page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The server could not be reached.
    #[error("Network error: {message}")]
    Transport {
        /// Description of the transport failure
        message: String,
    },

    /// The server answered with a non-success HTTP status.
    #[error("HTTP error! status: {status}")]
    Http {
        /// HTTP status code
        status: u16,
    },

    /// The envelope reported `success: false`.
    ///
    /// Displays the server's message verbatim.
    #[error("{message}")]
    Application {
        /// Message from the server
        message: String,
    },

    /// The requested item does not exist.
    #[error("Item not found: {identifier}")]
    NotFound {
        /// The id or slug that was requested
        identifier: String,
    },

    /// The response body could not be interpreted.
    #[error("Invalid catalog response: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },

    /// The client was configured with unusable values.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration
        message: String,
    },
}

impl CatalogError {
    /// Message suitable for showing next to an empty result set.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Result type alias for catalog port operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_message_is_verbatim() {
        let err = CatalogError::Application {
            message: "boom".to_string(),
        };
        assert_eq!(err.user_message(), "boom");
    }

    #[test]
    fn test_error_display() {
        let err = CatalogError::Http { status: 502 };
        assert!(err.to_string().contains("502"));

        let err = CatalogError::NotFound {
            identifier: "chatgpt".to_string(),
        };
        assert!(err.to_string().contains("chatgpt"));

        let err = CatalogError::Transport {
            message: "connection refused".to_string(),
        };
        assert!(err.to_string().starts_with("Network error"));
    }
}
