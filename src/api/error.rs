//! Error types for provider API operations.

use thiserror::Error;

/// Error type for the transport layer.
///
/// Nothing is retried: every variant ends the current run.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A replayed run has no canned response for this call.
    #[error("No canned response for '{key}'")]
    NoReplay {
        /// Call identifier that was looked up
        key: String,
    },
}

/// Error type for Linode API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be delivered.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The endpoint path does not form a valid URL.
    #[error("Invalid endpoint '{path}': {source}")]
    Endpoint {
        /// Endpoint path relative to the API base
        path: String,
        /// Underlying parse error
        #[source]
        source: url::ParseError,
    },

    /// The token cannot be sent as a header value.
    #[error("Token is not a valid header value")]
    InvalidToken(#[source] http::header::InvalidHeaderValue),

    /// The provider answered with a non-success status.
    #[error("Linode returned {status} for {path}: {body}")]
    Status {
        /// Endpoint path relative to the API base
        path: String,
        /// HTTP status code
        status: http::StatusCode,
        /// Response body, lossily decoded
        body: String,
    },

    /// The response body is not JSON.
    #[error("Invalid JSON from {path}: {source}")]
    Decode {
        /// Endpoint path relative to the API base
        path: String,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// A listing page is not an object or carries an error array.
    #[error("Linode query failed: {0}")]
    QueryFailed(String),

    /// A listed item does not have the expected shape.
    #[error("Unexpected {kind} entry: {source}")]
    Item {
        /// What was being decoded (`domain`, `record`)
        kind: &'static str,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },
}
