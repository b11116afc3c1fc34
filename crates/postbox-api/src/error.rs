//! Error types for API operations.

use reqwest::StatusCode;

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// API error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request error (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The server answered with an unsuccessful status code.
    #[error("Server returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// A string-valued response carried a JSON object or array.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Creates a status error from a response status and body.
    #[must_use]
    pub fn status(status: StatusCode, body: impl Into<String>) -> Self {
        Self::Status {
            status: status.as_u16(),
            body: body.into(),
        }
    }

    /// Returns the HTTP status code for [`Error::Status`].
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the server answered but rejected the request.
    ///
    /// Everything else is a transport-level fault.
    #[must_use]
    pub const fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}
