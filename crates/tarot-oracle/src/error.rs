//! Provider call errors.
//!
//! These never leave the interpretation service; it turns each one into a
//! [`DegradeReason`] on the reading.

use tarot_core::DegradeReason;
use thiserror::Error;

/// Result type for a single provider call.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Why a provider call produced no text.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request could not be sent or the connection failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The response had the expected shape but no text.
    #[error("empty response")]
    Empty,
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Malformed(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

impl ProviderError {
    /// The degrade reason recorded for this failure.
    pub fn into_reason(self, provider: &str) -> DegradeReason {
        let provider = provider.to_string();
        match self {
            Self::Transport(message) => DegradeReason::Transport { provider, message },
            Self::Status { .. } => DegradeReason::Transport {
                provider,
                message: self.to_string(),
            },
            Self::Malformed(message) => DegradeReason::MalformedResponse { provider, message },
            Self::Empty => DegradeReason::EmptyResponse { provider },
        }
    }
}
