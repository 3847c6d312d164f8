//! Google Gemini `generateContent` adapter
//!
//! The system instruction goes into `systemInstruction` unless
//! `use_concat_prompt` is set, in which case it is prepended to the user
//! message for models that reject system instructions.

use super::http_client::{HttpClient, parse_json};
use async_trait::async_trait;
use peer_review_application::{ProviderError, TextGenerationProvider};
use peer_review_domain::{ProviderIdentity, ReviewError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Separator between system and user text in concat mode
const CONCAT_SEPARATOR: &str = "\n\n---\n\n";

pub struct GeminiProvider {
    identity: ProviderIdentity,
    client: HttpClient,
    base_url: String,
    api_key: String,
    max_tokens: u32,
    use_concat_prompt: bool,
}

impl GeminiProvider {
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
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            max_tokens,
            use_concat_prompt: false,
        })
    }

    pub fn with_concat_prompt(mut self, enabled: bool) -> Self {
        self.use_concat_prompt = enabled;
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    fn build_request(&self, system: &str, user: &str) -> GenerateRequest {
        let (system_instruction, text) = if self.use_concat_prompt {
            (None, format!("{system}{CONCAT_SEPARATOR}{user}"))
        } else {
            (Some(Content::text(None, system)), user.to_string())
        };

        GenerateRequest {
            system_instruction,
            contents: vec![Content::text(Some("user"), &text)],
            generation_config: GenerationConfig {
                max_output_tokens: self.max_tokens,
            },
        }
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    if text.is_empty() { None } else { Some(text) }
}

#[async_trait]
impl TextGenerationProvider for GeminiProvider {
    fn identity(&self) -> &ProviderIdentity {
        &self.identity
    }

    async fn generate(
        &self,
        model: &str,
        system_instruction: &str,
        user_message: &str,
    ) -> Result<Option<String>, ProviderError> {
        debug!(
            provider = "gemini",
            model,
            concat_prompt = self.use_concat_prompt,
            "Invoking Gemini"
        );

        let request = self
            .client
            .post(&self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(&self.build_request(system_instruction, user_message));

        let body = self.client.send(request, "gemini").await?;
        let response: GenerateResponse = parse_json(&body, "Gemini")?;
        Ok(extract_text(response))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
struct Candidate {
    content: Option<Content>,
}
