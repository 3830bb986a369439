use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{CompletionProvider, CompletionRequest, non_empty, parse_json, send};
use crate::error::ProviderResult;

const API_VERSION: &str = "2023-06-01";

/// Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    endpoint: String,
    client: Client,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicProvider {
    /// Provider posting to `{endpoint}/v1/messages`.
    pub fn new(endpoint: impl Into<String>, client: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    fn body(request: &CompletionRequest) -> Value {
        json!({
            "model": request.model,
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
            "messages": [{ "role": "user", "content": request.prompt }],
        })
    }

    /// Concatenate the text blocks of a Messages response.
    fn parse(body: &str) -> ProviderResult<String> {
        let response: MessagesResponse = parse_json(body)?;
        let text: String = response
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect();
        non_empty(Some(text))
    }
}

#[async_trait]
impl CompletionProvider for AnthropicProvider {
    fn requires_credential(&self) -> bool {
        true
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
        credential: Option<&str>,
    ) -> ProviderResult<String> {
        let mut builder = self
            .client
            .post(format!("{}/v1/messages", self.endpoint))
            .header("anthropic-version", API_VERSION)
            .json(&Self::body(request));
        if let Some(key) = credential {
            builder = builder.header("x-api-key", key);
        }
        Self::parse(&send(builder).await?)
    }
}
