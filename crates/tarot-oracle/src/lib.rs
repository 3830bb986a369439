//! AI interpretation for tarot readings.
//!
//! Resolves a provider from settings, builds a prompt from the reading, makes
//! one bounded completion call, and always hands back a usable reading. A
//! failed or skipped call leaves the baseline text as the interpretation.

pub mod error;
pub mod prompt;
pub mod provider;
pub mod service;
pub mod settings;

pub use error::{ProviderError, ProviderResult};
pub use prompt::build_prompt;
pub use provider::{CompletionProvider, CompletionRequest, ProviderRegistry};
pub use service::{Interpretation, InterpretationService, InterpretationSource};
pub use settings::{
    Backend, CredentialResolver, EnvCredentials, InterpretationSettings, ProviderSettings,
    StaticCredentials,
};
