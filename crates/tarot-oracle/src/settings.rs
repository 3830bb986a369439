//! Resolved interpretation settings and credential resolution.
//!
//! These types are the already-merged configuration the service consumes.
//! Finding and merging config files is the caller's job.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default per-call timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Which wire protocol a provider speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Anthropic Messages API.
    Anthropic,
    /// OpenAI-compatible chat completions.
    OpenAi,
    /// Local Ollama chat API.
    Ollama,
}

impl Backend {
    /// Whether calls need an API key.
    pub fn requires_credential(self) -> bool {
        !matches!(self, Self::Ollama)
    }

    /// Endpoint root used when no base URL is configured.
    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::Anthropic => "https://api.anthropic.com",
            Self::OpenAi => "https://api.openai.com/v1",
            Self::Ollama => "http://localhost:11434",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anthropic => write!(f, "anthropic"),
            Self::OpenAi => write!(f, "openai"),
            Self::Ollama => write!(f, "ollama"),
        }
    }
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Settings for one provider entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Wire protocol.
    pub backend: Backend,
    /// Model identifier sent to the backend.
    pub model: String,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum output tokens.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Endpoint root; the backend default when absent.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Per-call timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ProviderSettings {
    /// Settings with default temperature, output size, and timeout.
    pub fn new(backend: Backend, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            base_url: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Set the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the maximum output tokens.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the endpoint root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the timeout in milliseconds.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// The effective endpoint root, without a trailing slash.
    pub fn endpoint(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.backend.default_base_url())
            .trim_end_matches('/')
    }

    /// The timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Everything the interpretation service needs to pick and call a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpretationSettings {
    /// Provider id used when the caller does not name one.
    pub default_provider: String,
    /// Provider entries keyed by id.
    pub providers: BTreeMap<String, ProviderSettings>,
}

impl Default for InterpretationSettings {
    fn default() -> Self {
        let mut providers = BTreeMap::new();
        providers.insert(
            "claude".to_string(),
            ProviderSettings::new(Backend::Anthropic, "claude-sonnet-4-5-20250929"),
        );
        providers.insert(
            "openai".to_string(),
            ProviderSettings::new(Backend::OpenAi, "gpt-4"),
        );
        providers.insert(
            "ollama".to_string(),
            ProviderSettings::new(Backend::Ollama, "deepseek-r1:8b")
                .with_temperature(0.8)
                .with_max_tokens(1500),
        );
        Self {
            default_provider: "claude".to_string(),
            providers,
        }
    }
}

impl InterpretationSettings {
    /// Settings with no providers at all.
    pub fn empty(default_provider: impl Into<String>) -> Self {
        Self {
            default_provider: default_provider.into(),
            providers: BTreeMap::new(),
        }
    }

    /// Set the default provider id.
    pub fn with_default_provider(mut self, id: impl Into<String>) -> Self {
        self.default_provider = id.into();
        self
    }

    /// Add or replace a provider entry.
    pub fn with_provider(mut self, id: impl Into<String>, settings: ProviderSettings) -> Self {
        self.providers.insert(id.into(), settings);
        self
    }

    /// Settings for one provider.
    pub fn provider(&self, id: &str) -> Option<&ProviderSettings> {
        self.providers.get(id)
    }
}

/// Maps a provider id to its secret, if one is available.
pub trait CredentialResolver: Send + Sync {
    /// The credential for `provider`, or `None`.
    fn credential(&self, provider: &str) -> Option<String>;
}

/// Reads credentials from environment variables.
///
/// `claude` reads `ANTHROPIC_API_KEY`, `openai` reads `OPENAI_API_KEY`, and
/// any other id reads `<ID>_API_KEY`. Empty values count as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl EnvCredentials {
    /// Environment variable consulted for a provider id.
    pub fn variable_for(provider: &str) -> String {
        match provider {
            "claude" | "anthropic" => "ANTHROPIC_API_KEY".to_string(),
            "openai" => "OPENAI_API_KEY".to_string(),
            other => format!("{}_API_KEY", other.to_uppercase().replace('-', "_")),
        }
    }
}

impl CredentialResolver for EnvCredentials {
    fn credential(&self, provider: &str) -> Option<String> {
        std::env::var(Self::variable_for(provider))
            .ok()
            .filter(|v| !v.trim().is_empty())
    }
}

/// A fixed map of credentials.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    keys: BTreeMap<String, String>,
}

impl StaticCredentials {
    /// No credentials.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a credential for a provider id.
    pub fn with(mut self, provider: impl Into<String>, key: impl Into<String>) -> Self {
        self.keys.insert(provider.into(), key.into());
        self
    }
}

impl CredentialResolver for StaticCredentials {
    fn credential(&self, provider: &str) -> Option<String> {
        self.keys.get(provider).cloned()
    }
}
