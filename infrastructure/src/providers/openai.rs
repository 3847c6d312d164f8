//! OpenAI Chat Completions adapter

use super::http_client::{HttpClient, parse_json};
use async_trait::async_trait;
use peer_review_application::{ProviderError, TextGenerationProvider};
use peer_review_domain::{ProviderIdentity, ReviewError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub struct OpenAiProvider {
    identity: ProviderIdentity,
    client: HttpClient,
    endpoint: String,
    api_key: String,
    max_tokens: u32,
}

impl OpenAiProvider {
    pub fn new(
        identity: ProviderIdentity,
        api_key: String,
        base_url: &str,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<Self, ReviewError> {
        Ok(Self {
            identity,
            client: HttpClient::new(timeout)?,
            endpoint: format!("{}/v1/chat/completions", base_url.trim_end_matches('/')),
            api_key,
            max_tokens,
        })
    }

    fn build_request(&self, model: &str, system: &str, user: &str) -> ChatRequest {
        ChatRequest {
            model: model.to_string(),
            max_completion_tokens: self.max_tokens,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Some(system.to_string()),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Some(user.to_string()),
                },
            ],
        }
    }
}

fn extract_text(response: ChatResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
}

#[async_trait]
impl TextGenerationProvider for OpenAiProvider {
    fn identity(&self) -> &ProviderIdentity {
        &self.identity
    }

    async fn generate(
        &self,
        model: &str,
        system_instruction: &str,
        user_message: &str,
    ) -> Result<Option<String>, ProviderError> {
        debug!(provider = "openai", model, "Invoking OpenAI");

        let request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.build_request(model, system_instruction, user_message));

        let body = self.client.send(request, "openai").await?;
        let response: ChatResponse = parse_json(&body, "OpenAI")?;
        Ok(extract_text(response))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct ChatRequest {
    model: String,
    max_completion_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::http_client::test_server;
    use axum::{Json, Router, http::HeaderMap, http::StatusCode, routing::post};
    use serde_json::{Value, json};

    fn provider(base_url: &str) -> OpenAiProvider {
        OpenAiProvider::new(
            ProviderIdentity::new("GPT"),
            "sk-test".to_string(),
            base_url,
            4096,
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_request_shape() {
        let request = provider("https://api.openai.com").build_request("gpt", "sys", "hi");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["max_completion_tokens"], 4096);
        assert_eq!(value["messages"][0], json!({"role": "system", "content": "sys"}));
        assert_eq!(value["messages"][1], json!({"role": "user", "content": "hi"}));
    }

    #[test]
    fn test_extract_text() {
        let response: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": "Four."}}]
        }))
        .unwrap();
        assert_eq!(extract_text(response), Some("Four.".to_string()));

        let empty: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert_eq!(extract_text(empty), None);

        let null_content: ChatResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        }))
        .unwrap();
        assert_eq!(extract_text(null_content), None);
    }

    #[tokio::test]
    async fn test_generate_against_local_server() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["authorization"], "Bearer sk-test");
                assert_eq!(body["model"], "gpt-test");
                Json(json!({"choices": [{"message": {"role": "assistant", "content": "Four."}}]}))
            }),
        );
        let base = test_server::spawn(router).await;

        let text = provider(&base)
            .generate("gpt-test", "sys", "What is 2+2?")
            .await
            .unwrap();
        assert_eq!(text, Some("Four.".to_string()));
    }

    #[tokio::test]
    async fn test_generate_rate_limited_is_transient() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "rate limit exceeded") }),
        );
        let base = test_server::spawn(router).await;

        let err = provider(&base).generate("m", "s", "u").await.unwrap_err();
        assert!(matches!(err, ProviderError::Http { status: 429, .. }));
        assert!(err.class().is_transient());
    }

    #[tokio::test]
    async fn test_generate_malformed_body() {
        let router = Router::new().route("/v1/chat/completions", post(|| async { "<html>" }));
        let base = test_server::spawn(router).await;

        let err = provider(&base).generate("m", "s", "u").await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }
}
