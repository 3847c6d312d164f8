//! Provider configuration from TOML (`[providers]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which backend API a provider entry talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Anthropic,
    #[serde(rename = "openai")]
    OpenAi,
    Gemini,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::Anthropic,
        ProviderKind::OpenAi,
        ProviderKind::Gemini,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Gemini => "gemini",
        }
    }

    /// Name shown to users in labels and error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "Claude",
            ProviderKind::OpenAi => "GPT",
            ProviderKind::Gemini => "Gemini",
        }
    }

    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Gemini => "GEMINI_API_KEY",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "https://api.anthropic.com",
            ProviderKind::OpenAi => "https://api.openai.com",
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Anthropic => "claude-sonnet-4-5",
            ProviderKind::OpenAi => "gpt-5.2",
            ProviderKind::Gemini => "gemini-3-flash-preview",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            "openai" | "gpt" | "chatgpt" => Ok(ProviderKind::OpenAi),
            "gemini" => Ok(ProviderKind::Gemini),
            other => Err(format!(
                "unknown provider '{other}' (expected anthropic, openai or gemini)"
            )),
        }
    }
}

/// Settings for one provider API.
///
/// Unset string fields fall back to the defaults of the [`ProviderKind`] the
/// entry is read for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Environment variable holding the API key.
    pub api_key_env: Option<String>,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    /// Max tokens per response.
    pub max_tokens: u32,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Gemini only: prepend the system instruction to the user message
    /// instead of sending `systemInstruction`.
    pub use_concat_prompt: bool,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: None,
            api_key: None,
            base_url: None,
            model: None,
            max_tokens: 4096,
            timeout_secs: 120,
            use_concat_prompt: false,
        }
    }
}

impl FileProviderConfig {
    pub fn api_key_env_for(&self, kind: ProviderKind) -> &str {
        self.api_key_env
            .as_deref()
            .unwrap_or_else(|| kind.default_api_key_env())
    }

    pub fn base_url_for(&self, kind: ProviderKind) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| kind.default_base_url())
    }

    pub fn model_for(&self, kind: ProviderKind) -> &str {
        self.model.as_deref().unwrap_or_else(|| kind.default_model())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub anthropic: FileProviderConfig,
    pub openai: FileProviderConfig,
    pub gemini: FileProviderConfig,
}

impl FileProvidersConfig {
    pub fn get(&self, kind: ProviderKind) -> &FileProviderConfig {
        match kind {
            ProviderKind::Anthropic => &self.anthropic,
            ProviderKind::OpenAi => &self.openai,
            ProviderKind::Gemini => &self.gemini,
        }
    }
}
