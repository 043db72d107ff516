//! Error types for the xpub scanner

use thiserror::Error;

/// Result type alias using our custom Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the scanner
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Currency resolution errors
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Invalid key prefix: {0} has not a valid prefix")]
    InvalidKeyPrefix(String),

    // Derivation errors
    #[error("Address derivation failed: {0}")]
    Derivation(String),

    // Network errors
    #[error("GET request to {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    #[error("No result after {retries} retries")]
    NoResult { retries: u32 },

    // Explorer payload errors
    #[error("Malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Check if this error is retryable (transient)
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Fetch { .. })
    }

    pub(crate) fn fetch(url: &str, reason: impl ToString) -> Self {
        Error::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn malformed(url: &str, reason: impl ToString) -> Self {
        Error::MalformedResponse {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

// Conversion from serde_json errors
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

// Conversion from I/O errors
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}
