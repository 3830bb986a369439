use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{CompletionProvider, CompletionRequest, non_empty, parse_json, send};
use crate::error::{ProviderError, ProviderResult};

/// OpenAI-compatible chat completions.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    endpoint: String,
    client: Client,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    /// Provider posting to `{endpoint}/chat/completions`.
    pub fn new(endpoint: impl Into<String>, client: Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }

    fn body(request: &CompletionRequest) -> Value {
        json!({
            "model": request.model,
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
            "messages": [{ "role": "user", "content": request.prompt }],
        })
    }

    fn parse(body: &str) -> ProviderResult<String> {
        let response: ChatResponse = parse_json(body)?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Malformed("no choices in response".to_string()))?;
        non_empty(choice.message.content)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
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
            .post(format!("{}/chat/completions", self.endpoint))
            .json(&Self::body(request));
        if let Some(key) = credential {
            builder = builder.bearer_auth(key);
        }
        Self::parse(&send(builder).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_first_choice() {
        let body = r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"Courage."}}]}"#;
        assert_eq!(OpenAiProvider::parse(body).unwrap(), "Courage.");
    }

    #[test]
    fn null_content_is_empty() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        assert!(matches!(OpenAiProvider::parse(body), Err(ProviderError::Empty)));
    }

    #[test]
    fn no_choices_is_malformed() {
        assert!(matches!(
            OpenAiProvider::parse(r#"{"choices":[]}"#),
            Err(ProviderError::Malformed(_))
        ));
    }

    #[test]
    fn non_json_is_malformed() {
        assert!(matches!(
            OpenAiProvider::parse("<html>bad gateway</html>"),
            Err(ProviderError::Malformed(_))
        ));
    }

    #[test]
    fn body_carries_parameters() {
        let request = CompletionRequest {
            prompt: "p".into(),
            model: "gpt-4".into(),
            temperature: 0.25,
            max_tokens: 99,
        };
        let body = OpenAiProvider::body(&request);
        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["max_tokens"], 99);
        assert_eq!(body["temperature"], 0.25);
    }
}
