//! Error types for the paper finder.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

use std::time::Duration;

/// Message shown for any failed search, whatever the cause.
pub const GENERIC_FETCH_ERROR: &str = "Failed to fetch results. Please try again.";

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Middleware error
    #[error("Middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// Rate limited by an upstream API (429 response)
    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Suggested wait time before retry
        retry_after: Duration,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response or arXiv error feed)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Atom feed parsing error
    #[error("Failed to parse feed: {0}")]
    Xml(#[from] quick_xml::de::DeError),

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error with retry-after duration.
    #[must_use]
    pub fn rate_limited(seconds: u64) -> Self {
        Self::RateLimited { retry_after: Duration::from_secs(seconds) }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }
}

/// Errors from the persisted entry store.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// Filesystem error
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data is not a valid entry list
    #[error("Corrupt entry store: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Submitted entry failed validation
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Form field that failed validation
        field: String,
        /// Validation error message
        message: String,
    },
}

impl StoreError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }
}

/// Errors from a search.
#[derive(thiserror::Error, Debug)]
pub enum SearchError {
    /// Error from one of the APIs
    #[error("API error: {0}")]
    Client(#[from] ClientError),

    /// Error reading user entries
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl SearchError {
    /// Convert to the message shown to the user.
    ///
    /// Every failure collapses to [`GENERIC_FETCH_ERROR`]; details go to the log.
    #[must_use]
    pub fn to_user_message(&self) -> String {
        GENERIC_FETCH_ERROR.to_string()
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for searches.
pub type SearchResult<T> = Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_display() {
        assert_eq!(ClientError::rate_limited(7).to_string(), "Rate limited, retry after 7s");
        assert_eq!(ClientError::not_found("works").to_string(), "Resource not found: works");
        assert_eq!(ClientError::server(503, "down").to_string(), "Server error (503): down");
    }

    #[test]
    fn test_search_error_collapses_to_generic_message() {
        let errors = [
            SearchError::from(ClientError::server(500, "boom")),
            SearchError::from(ClientError::bad_request("bad")),
            SearchError::from(StoreError::validation("title", "required")),
            SearchError::from(ClientError::Timeout(Duration::from_secs(30))),
        ];
        for err in errors {
            assert_eq!(err.to_user_message(), GENERIC_FETCH_ERROR);
        }
    }

    #[test]
    fn test_store_validation_display() {
        let err = StoreError::validation("link", "must be an http(s) URL");
        assert_eq!(err.to_string(), "Invalid link: must be an http(s) URL");
    }
}
