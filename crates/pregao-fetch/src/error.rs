//! Fetch errors.

use thiserror::Error;

/// Errors that can occur while retrieving raw price history.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error status after all retries.
    #[error("Server error: {status}")]
    ServerError {
        /// HTTP status code.
        status: u16,
    },

    /// The provider answered with an error object.
    #[error("Provider error: {code} - {description}")]
    Provider {
        /// Provider error code.
        code: String,
        /// Human-readable description.
        description: String,
    },

    /// The response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<FetchError> for pregao_types::PregaoError {
    fn from(err: FetchError) -> Self {
        Self::Http(err.to_string())
    }
}
