//! The reading aggregate and its enrichment outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::card::DrawnCard;
use crate::focus::FocusArea;
use crate::spread::SpreadKind;

/// Why AI enrichment did not produce text.
///
/// The first two variants mean no call was made ([`EnrichmentState::Skipped`]);
/// the rest mean a call was attempted and failed
/// ([`EnrichmentState::FailedFallback`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DegradeReason {
    /// The provider needs a credential and none was configured.
    CredentialMissing { provider: String },
    /// No provider with this id is configured.
    UnknownProvider { provider: String },
    /// The call did not finish in time.
    Timeout { provider: String, after_ms: u64 },
    /// Connection, TLS, or HTTP status failure.
    Transport { provider: String, message: String },
    /// The response body could not be understood.
    MalformedResponse { provider: String, message: String },
    /// The response carried no usable text.
    EmptyResponse { provider: String },
    /// The blocking entry point could not start its runtime.
    RuntimeUnavailable { message: String },
}

impl DegradeReason {
    /// Whether enrichment was skipped before any call was made.
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            Self::CredentialMissing { .. } | Self::UnknownProvider { .. }
        )
    }
}

impl std::fmt::Display for DegradeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CredentialMissing { provider } => {
                write!(f, "no credential configured for provider '{provider}'")
            }
            Self::UnknownProvider { provider } => write!(f, "unknown provider '{provider}'"),
            Self::Timeout { provider, after_ms } => {
                write!(f, "provider '{provider}' timed out after {after_ms}ms")
            }
            Self::Transport { provider, message } => {
                write!(f, "provider '{provider}' request failed: {message}")
            }
            Self::MalformedResponse { provider, message } => {
                write!(f, "provider '{provider}' returned a malformed response: {message}")
            }
            Self::EmptyResponse { provider } => {
                write!(f, "provider '{provider}' returned an empty response")
            }
            Self::RuntimeUnavailable { message } => {
                write!(f, "async runtime unavailable: {message}")
            }
        }
    }
}

/// Where a reading stands with respect to AI enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichmentState {
    /// No enrichment has been requested.
    NotAttempted,
    /// Enrichment was not tried; see the reason.
    Skipped,
    /// AI text is present.
    Succeeded,
    /// A call failed; the baseline stands alone.
    FailedFallback,
}

/// A complete reading.
///
/// The baseline text is always present, so a reading is presentable as soon
/// as it is assembled. Enrichment only ever fills in `ai_interpretation` and
/// `provider`, or records why it could not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    /// Area of life the reading is framed around.
    pub focus_area: FocusArea,
    /// The querent's question, trimmed; `None` when blank.
    pub question: Option<String>,
    /// Drawn cards in spread position order.
    pub cards: Vec<DrawnCard>,
    /// Card meanings rendered per position.
    pub baseline: String,
    /// Provider text, set only on successful enrichment.
    pub ai_interpretation: Option<String>,
    /// Id of the provider that produced `ai_interpretation`.
    pub provider: Option<String>,
    /// Why enrichment was skipped or failed.
    pub reason: Option<DegradeReason>,
    /// Spread the cards were laid out in.
    pub spread: SpreadKind,
    /// When the reading was assembled.
    pub created_at: DateTime<Utc>,
}

impl Reading {
    /// Current enrichment state, derived from the AI fields.
    pub fn state(&self) -> EnrichmentState {
        match (&self.ai_interpretation, &self.reason) {
            (Some(_), _) => EnrichmentState::Succeeded,
            (None, Some(reason)) if reason.is_skip() => EnrichmentState::Skipped,
            (None, Some(_)) => EnrichmentState::FailedFallback,
            (None, None) => EnrichmentState::NotAttempted,
        }
    }

    /// Store AI text from a successful call.
    pub fn record_success(&mut self, provider: impl Into<String>, text: impl Into<String>) {
        self.ai_interpretation = Some(text.into());
        self.provider = Some(provider.into());
        self.reason = None;
    }

    /// Record why enrichment produced nothing. The baseline is untouched.
    pub fn record_degraded(&mut self, reason: DegradeReason) {
        self.ai_interpretation = None;
        self.provider = None;
        self.reason = Some(reason);
    }

    /// The best available interpretation: AI text if present, else baseline.
    pub fn text(&self) -> &str {
        self.ai_interpretation.as_deref().unwrap_or(&self.baseline)
    }
}
