//! Weather provider errors.

use thiserror::Error;

/// Errors returned while resolving weather for a location.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No API key in settings or environment.
    #[error("weather API key is missing or blank")]
    MissingApiKey,

    /// Stored settings could not be read.
    #[error("failed to read settings: {0}")]
    Settings(String),

    /// Request failed before a response arrived (connect, TLS, timeout).
    #[error("weather request failed: {0}")]
    Http(String),

    /// Provider answered with a non-success status.
    #[error("weather provider returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response did not have the expected shape.
    #[error("invalid weather data received: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        // Never include the URL, it carries the API key
        ProviderError::Http(e.without_url().to_string())
    }
}

/// Result type for weather lookups.
pub type Result<T> = std::result::Result<T, ProviderError>;
