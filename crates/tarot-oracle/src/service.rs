//! The interpretation service.
//!
//! [`InterpretationService::resolve`] is the single core routine. It is a
//! total function: every outcome, success or not, comes back as an
//! [`Interpretation`]. [`InterpretationService::interpret`] applies that
//! outcome to a reading, and [`InterpretationService::interpret_blocking`]
//! drives the same routine on the calling thread.

use std::sync::Arc;

use tarot_core::{DegradeReason, Reading};
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::{debug, info, warn};

use crate::prompt::build_prompt;
use crate::provider::{CompletionProvider, CompletionRequest, ProviderRegistry};
use crate::settings::{CredentialResolver, EnvCredentials, InterpretationSettings};

/// Where the interpretation text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpretationSource {
    /// The reading's own baseline text.
    Baseline,
    /// A provider's completion.
    Ai,
}

/// Outcome of one enrichment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    /// The text to show: AI output on success, the baseline otherwise.
    pub text: String,
    /// Which of the two `text` is.
    pub source: InterpretationSource,
    /// Provider that produced the text, on success.
    pub provider: Option<String>,
    /// Why the baseline was used, when it was.
    pub reason: Option<DegradeReason>,
}

impl Interpretation {
    fn ai(provider: &str, text: String) -> Self {
        Self {
            text,
            source: InterpretationSource::Ai,
            provider: Some(provider.to_string()),
            reason: None,
        }
    }

    fn baseline(reading: &Reading, reason: DegradeReason) -> Self {
        Self {
            text: reading.baseline.clone(),
            source: InterpretationSource::Baseline,
            provider: None,
            reason: Some(reason),
        }
    }

    /// Write this outcome into a reading's AI fields.
    pub fn apply(self, reading: &mut Reading) {
        match (self.source, self.provider, self.reason) {
            (InterpretationSource::Ai, Some(provider), _) => {
                reading.record_success(provider, self.text);
            }
            (_, _, Some(reason)) => reading.record_degraded(reason),
            _ => {}
        }
    }
}

/// Optional AI enrichment for readings.
///
/// Makes at most one outbound call per invocation and never returns an
/// error: timeouts, transport failures, bad responses, and missing
/// credentials all leave the reading with its baseline and a recorded reason.
#[derive(Clone)]
pub struct InterpretationService {
    settings: InterpretationSettings,
    credentials: Arc<dyn CredentialResolver>,
    registry: ProviderRegistry,
}

impl InterpretationService {
    /// A service with one HTTP provider per configured entry, reading
    /// credentials from the environment.
    pub fn new(settings: InterpretationSettings) -> Self {
        let registry = ProviderRegistry::from_settings(&settings);
        Self {
            settings,
            credentials: Arc::new(EnvCredentials),
            registry,
        }
    }

    /// Replace the credential resolver.
    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialResolver>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Register or replace the implementation behind a provider id.
    ///
    /// The id still needs an entry in the settings for its model parameters
    /// and timeout.
    pub fn with_provider(
        mut self,
        id: impl Into<String>,
        provider: Arc<dyn CompletionProvider>,
    ) -> Self {
        self.registry.register(id, provider);
        self
    }

    /// The settings this service was built from.
    pub fn settings(&self) -> &InterpretationSettings {
        &self.settings
    }

    /// Resolve an interpretation for a reading.
    ///
    /// `provider` overrides the configured default.
    pub async fn resolve(&self, reading: &Reading, provider: Option<&str>) -> Interpretation {
        let id = provider.unwrap_or(self.settings.default_provider.as_str());

        let (Some(settings), Some(backend)) = (self.settings.provider(id), self.registry.get(id))
        else {
            return self.skip(reading, DegradeReason::UnknownProvider {
                provider: id.to_string(),
            });
        };

        let credential = self.credentials.credential(id);
        if backend.requires_credential() && credential.is_none() {
            return self.skip(reading, DegradeReason::CredentialMissing {
                provider: id.to_string(),
            });
        }

        let request = CompletionRequest::new(build_prompt(reading), settings);
        let timeout = settings.timeout();
        debug!(provider = id, model = %request.model, ?timeout, "requesting interpretation");

        let outcome =
            tokio::time::timeout(timeout, backend.complete(&request, credential.as_deref())).await;

        let reason = match outcome {
            Ok(Ok(text)) if !text.trim().is_empty() => {
                info!(provider = id, "interpretation succeeded");
                return Interpretation::ai(id, text);
            }
            Ok(Ok(_)) => DegradeReason::EmptyResponse {
                provider: id.to_string(),
            },
            Ok(Err(e)) => e.into_reason(id),
            Err(_) => DegradeReason::Timeout {
                provider: id.to_string(),
                after_ms: settings.timeout_ms,
            },
        };

        warn!(provider = id, %reason, "interpretation failed, using baseline");
        Interpretation::baseline(reading, reason)
    }

    /// Enrich a reading, awaiting the provider call.
    pub async fn interpret(&self, mut reading: Reading, provider: Option<&str>) -> Reading {
        self.resolve(&reading, provider).await.apply(&mut reading);
        reading
    }

    /// Enrich a reading, blocking the calling thread on the same routine.
    ///
    /// Inside a multi-thread runtime the call runs via `block_in_place`.
    /// A current-thread runtime cannot be blocked on, so that case records
    /// [`DegradeReason::RuntimeUnavailable`] instead of calling out.
    pub fn interpret_blocking(&self, mut reading: Reading, provider: Option<&str>) -> Reading {
        if let Ok(handle) = Handle::try_current() {
            if handle.runtime_flavor() == RuntimeFlavor::MultiThread {
                return tokio::task::block_in_place(|| {
                    handle.block_on(self.interpret(reading, provider))
                });
            }
            reading.record_degraded(DegradeReason::RuntimeUnavailable {
                message: "blocking call made from within a current-thread runtime".to_string(),
            });
            return reading;
        }

        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                warn!(error = %e, "could not start runtime, using baseline");
                reading.record_degraded(DegradeReason::RuntimeUnavailable {
                    message: e.to_string(),
                });
                return reading;
            }
        };

        runtime.block_on(self.interpret(reading, provider))
    }

    fn skip(&self, reading: &Reading, reason: DegradeReason) -> Interpretation {
        info!(%reason, "interpretation skipped");
        Interpretation::baseline(reading, reason)
    }
}

impl std::fmt::Debug for InterpretationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterpretationService")
            .field("settings", &self.settings)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::StaticCredentials;
    use tarot_core::{CardCatalog, Deck, EnrichmentState, FocusArea, SpreadKind, assemble};

    fn reading() -> Reading {
        let catalog = CardCatalog::rider_waite().unwrap();
        let mut deck = Deck::new(&catalog);
        deck.shuffle(Some(8));
        let template = SpreadKind::Single.template();
        assemble(&template, deck.draw(1).unwrap(), FocusArea::General, None).unwrap()
    }

    #[tokio::test]
    async fn unknown_provider_is_skipped() {
        let service = InterpretationService::new(InterpretationSettings::default());
        let r = service.interpret(reading(), Some("gemini")).await;
        assert_eq!(r.state(), EnrichmentState::Skipped);
        assert_eq!(
            r.reason,
            Some(DegradeReason::UnknownProvider {
                provider: "gemini".to_string()
            })
        );
    }

    #[tokio::test]
    async fn missing_credential_is_skipped() {
        let service = InterpretationService::new(InterpretationSettings::default())
            .with_credentials(Arc::new(StaticCredentials::new()));
        let original = reading();
        let interp = service.resolve(&original, None).await;
        assert_eq!(interp.source, InterpretationSource::Baseline);
        assert_eq!(interp.text, original.baseline);
        assert_eq!(
            interp.reason,
            Some(DegradeReason::CredentialMissing {
                provider: "claude".to_string()
            })
        );
    }

    #[tokio::test]
    async fn blocking_inside_current_thread_runtime_degrades() {
        let service = InterpretationService::new(InterpretationSettings::default());
        let r = service.interpret_blocking(reading(), None);
        assert!(matches!(
            r.reason,
            Some(DegradeReason::RuntimeUnavailable { .. })
        ));
        assert_eq!(r.state(), EnrichmentState::FailedFallback);
    }
}
