//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur while setting up the client.
#[derive(Debug, Error)]
pub enum Error {
    /// API client could not be built.
    #[error("API error: {0}")]
    Api(#[from] postbox_api::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid TOML for [`crate::ClientConfig`].
    #[error("Configuration parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration value is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
