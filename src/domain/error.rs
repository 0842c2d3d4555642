//! Error types for the Roster plugin.
//!
//! This module defines the crate-wide error type [`RosterError`], the API
//! failure type [`ApiError`], and a [`Result`] alias. Both enums derive their
//! `Error` implementations through `thiserror`.

use thiserror::Error;

/// Failure reported for a single REST call.
///
/// The backend contract is flat: a call either succeeds or fails. Only
/// `NotFound` is singled out because the detail view renders it differently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The requested employee does not exist (HTTP 404).
    #[error("employee not found")]
    NotFound,

    /// The server answered with a non-success status.
    #[error("request failed with status {status}: {message}")]
    Status {
        /// HTTP status code returned by the host.
        status: u16,
        /// Response body, lossily decoded, for logging.
        message: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// The main error type for Roster operations.
///
/// Core state managers (notifications, filtering) never fail; these variants
/// cover the edges: request preparation, decoding, configuration and files.
///
/// # Examples
///
/// ```
/// use roster::RosterError;
///
/// fn check_url(url: &str) -> Result<(), RosterError> {
///     if url.is_empty() {
///         return Err(RosterError::Config("api_url is empty".to_string()));
///     }
///     Ok(())
/// }
/// assert!(check_url("").is_err());
/// ```
#[derive(Debug, Error)]
pub enum RosterError {
    /// A REST call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// JSON encoding or decoding failed outside of a response body.
    ///
    /// Typically a malformed request correlation context.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Roster operations.
pub type Result<T> = std::result::Result<T, RosterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_converts_into_roster_error() {
        let err: RosterError = ApiError::NotFound.into();
        assert!(matches!(err, RosterError::Api(ApiError::NotFound)));
        assert_eq!(err.to_string(), "API error: employee not found");
    }

    #[test]
    fn status_error_mentions_code() {
        let err = ApiError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "request failed with status 500: boom");
    }
}
