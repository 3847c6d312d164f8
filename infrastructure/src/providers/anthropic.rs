//! Anthropic Messages API adapter

use super::http_client::{HttpClient, parse_json};
use async_trait::async_trait;
use peer_review_application::{ProviderError, TextGenerationProvider};
use peer_review_domain::{ProviderIdentity, ReviewError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Anthropic API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    identity: ProviderIdentity,
    client: HttpClient,
    endpoint: String,
    api_key: String,
    max_tokens: u32,
}

impl AnthropicProvider {
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
            endpoint: format!("{}/v1/messages", base_url.trim_end_matches('/')),
            api_key,
            max_tokens,
        })
    }

    fn build_request(&self, model: &str, system: &str, user: &str) -> AnthropicRequest {
        AnthropicRequest {
            model: model.to_string(),
            max_tokens: self.max_tokens,
            system: system.to_string(),
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: user.to_string(),
            }],
        }
    }
}

/// Join the text blocks of a response. Non-text blocks are skipped.
fn extract_text(response: AnthropicResponse) -> Option<String> {
    let parts: Vec<String> = response
        .content
        .into_iter()
        .filter(|block| block.content_type == "text")
        .filter_map(|block| block.text)
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n\n"))
    }
}

#[async_trait]
impl TextGenerationProvider for AnthropicProvider {
    fn identity(&self) -> &ProviderIdentity {
        &self.identity
    }

    async fn generate(
        &self,
        model: &str,
        system_instruction: &str,
        user_message: &str,
    ) -> Result<Option<String>, ProviderError> {
        debug!(provider = "anthropic", model, max_tokens = self.max_tokens, "Invoking Anthropic");

        let request = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.build_request(model, system_instruction, user_message));

        let body = self.client.send(request, "anthropic").await?;
        let response: AnthropicResponse = parse_json(&body, "Anthropic")?;
        Ok(extract_text(response))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Clone, Deserialize)]
struct AnthropicResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}
