//! Completion providers.
//!
//! One capability trait, [`CompletionProvider`], with an implementation per
//! backend. The service picks an implementation by looking the provider id up
//! in a [`ProviderRegistry`]; nothing else selects between them.
//!
//! ```text
//! CompletionProvider (trait)
//! ├── AnthropicProvider   POST {base}/v1/messages
//! ├── OpenAiProvider      POST {base}/chat/completions
//! └── OllamaProvider      POST {base}/api/chat
//! ```

mod anthropic;
mod ollama;
mod openai;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};

use crate::error::{ProviderError, ProviderResult};
use crate::settings::{Backend, InterpretationSettings, ProviderSettings};

pub use anthropic::AnthropicProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// One completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// The full prompt, sent as a single user message.
    pub prompt: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum output tokens.
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// A request for `prompt` using a provider's model parameters.
    pub fn new(prompt: impl Into<String>, settings: &ProviderSettings) -> Self {
        Self {
            prompt: prompt.into(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }
}

/// A backend that turns a prompt into text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Whether a credential must be present before calling.
    fn requires_credential(&self) -> bool;

    /// Make one call. No retries.
    async fn complete(
        &self,
        request: &CompletionRequest,
        credential: Option<&str>,
    ) -> ProviderResult<String>;
}

/// Provider implementations keyed by provider id.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn CompletionProvider>>,
}

impl ProviderRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// One HTTP provider per configured entry, sharing a client.
    pub fn from_settings(settings: &InterpretationSettings) -> Self {
        let client = Client::new();
        let mut registry = Self::new();
        for (id, provider) in &settings.providers {
            registry.register(id.clone(), http_provider(provider, client.clone()));
        }
        registry
    }

    /// Add or replace the provider for an id.
    pub fn register(&mut self, id: impl Into<String>, provider: Arc<dyn CompletionProvider>) {
        self.providers.insert(id.into(), provider);
    }

    /// The provider for an id.
    pub fn get(&self, id: &str) -> Option<Arc<dyn CompletionProvider>> {
        self.providers.get(id).cloned()
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.ids())
            .finish()
    }
}

/// Build the HTTP implementation for a provider entry.
pub fn http_provider(settings: &ProviderSettings, client: Client) -> Arc<dyn CompletionProvider> {
    let endpoint = settings.endpoint().to_string();
    match settings.backend {
        Backend::Anthropic => Arc::new(AnthropicProvider::new(endpoint, client)),
        Backend::OpenAi => Arc::new(OpenAiProvider::new(endpoint, client)),
        Backend::Ollama => Arc::new(OllamaProvider::new(endpoint, client)),
    }
}

/// Send a request and return the body of a successful response.
async fn send(request: RequestBuilder) -> ProviderResult<String> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body: truncate(&body, 200),
        });
    }
    Ok(body)
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

/// Parse a response body, mapping any shape mismatch to `Malformed`.
fn parse_json<T: serde::de::DeserializeOwned>(body: &str) -> ProviderResult<T> {
    serde_json::from_str(body).map_err(|e| ProviderError::Malformed(e.to_string()))
}

/// `Empty` when the text is missing or whitespace.
fn non_empty(text: Option<String>) -> ProviderResult<String> {
    match text {
        Some(t) if !t.trim().is_empty() => Ok(t),
        _ => Err(ProviderError::Empty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_from_default_settings() {
        let registry = ProviderRegistry::from_settings(&InterpretationSettings::default());
        assert_eq!(registry.ids(), ["claude", "ollama", "openai"]);
        assert!(registry.get("claude").unwrap().requires_credential());
        assert!(!registry.get("ollama").unwrap().requires_credential());
        assert!(registry.get("gemini").is_none());
    }

    #[test]
    fn request_uses_provider_parameters() {
        let settings = ProviderSettings::new(Backend::Ollama, "llama3").with_max_tokens(64);
        let request = CompletionRequest::new("hello", &settings);
        assert_eq!(request.model, "llama3");
        assert_eq!(request.max_tokens, 64);
    }

    #[test]
    fn truncate_long_bodies() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }

    #[test]
    fn whitespace_is_empty() {
        assert!(matches!(non_empty(Some("  \n".into())), Err(ProviderError::Empty)));
        assert!(matches!(non_empty(None), Err(ProviderError::Empty)));
        assert_eq!(non_empty(Some("ok".into())).unwrap(), "ok");
    }
}
