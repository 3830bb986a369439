use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{CompletionProvider, CompletionRequest, non_empty, parse_json, send};
use crate::error::ProviderResult;

/// Local Ollama chat API. Needs no credential.
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    endpoint: String,
    client: Client,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

impl OllamaProvider {
    /// Provider posting to `{endpoint}/api/chat`.
    pub fn new(endpoint: impl Into<String>, client: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    fn body(request: &CompletionRequest) -> Value {
        json!({
            "model": request.model,
            "stream": false,
            "messages": [{ "role": "user", "content": request.prompt }],
            "options": {
                "temperature": request.temperature,
                "num_predict": request.max_tokens,
            },
        })
    }

    fn parse(body: &str) -> ProviderResult<String> {
        let response: ChatResponse = parse_json(body)?;
        non_empty(response.message.content)
    }
}

#[async_trait]
impl CompletionProvider for OllamaProvider {
    fn requires_credential(&self) -> bool {
        false
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
        _credential: Option<&str>,
    ) -> ProviderResult<String> {
        let builder = self
            .client
            .post(format!("{}/api/chat", self.endpoint))
            .json(&Self::body(request));
        Self::parse(&send(builder).await?)
    }
}
