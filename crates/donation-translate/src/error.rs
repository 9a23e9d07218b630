//! Error types for category translation.

use thiserror::Error;

/// Errors returned by a translation service.
///
/// None of these fail a run: the translator keeps the source label instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TranslateError {
    /// The request could not be sent or the response could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("translation service returned HTTP {status}")]
    Status { status: u16 },

    /// The response body did not have the expected shape.
    #[error("malformed translation response: {0}")]
    Malformed(String),

    /// No service is configured (offline mode).
    #[error("translation service unavailable")]
    Unavailable,
}

impl TranslateError {
    /// Returns whether another attempt could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status } => *status == 429 || *status >= 500,
            Self::Malformed(_) | Self::Unavailable => false,
        }
    }
}

impl From<reqwest::Error> for TranslateError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for TranslateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Result type alias for translation calls.
pub type Result<T> = std::result::Result<T, TranslateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(TranslateError::Network("reset".to_string()).is_retryable());
        assert!(TranslateError::Status { status: 503 }.is_retryable());
        assert!(TranslateError::Status { status: 429 }.is_retryable());
        assert!(!TranslateError::Status { status: 400 }.is_retryable());
        assert!(!TranslateError::Unavailable.is_retryable());
        assert!(!TranslateError::Malformed("[]".to_string()).is_retryable());
    }
}
