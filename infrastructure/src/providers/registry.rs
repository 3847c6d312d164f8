//! Provider registry
//!
//! Builds provider adapters from configuration and assembles the
//! [`ReviewRoster`]. Credentials are resolved here, once, before any stage
//! runs; a missing key is a configuration error.

use super::anthropic::AnthropicProvider;
use super::gemini::GeminiProvider;
use super::openai::OpenAiProvider;
use crate::config::{FileConfig, ProviderKind};
use peer_review_application::{ProviderBinding, ReviewRoster, TextGenerationProvider};
use peer_review_domain::{ProviderIdentity, ReviewError, Role};
use std::sync::Arc;
use tracing::{debug, info};

/// Creates provider bindings from a loaded [`FileConfig`]
pub struct ProviderRegistry<'a> {
    config: &'a FileConfig,
    lookup_env: Box<dyn Fn(&str) -> Option<String> + 'a>,
}

impl<'a> ProviderRegistry<'a> {
    /// Registry reading credentials from the process environment
    pub fn new(config: &'a FileConfig) -> Self {
        Self::with_env(config, |name| std::env::var(name).ok())
    }

    /// Registry reading credentials through `lookup_env`
    pub fn with_env(
        config: &'a FileConfig,
        lookup_env: impl Fn(&str) -> Option<String> + 'a,
    ) -> Self {
        Self {
            config,
            lookup_env: Box::new(lookup_env),
        }
    }

    /// Build the roster for a three-stage review from `[roles]`.
    pub fn build_roster(&self) -> Result<ReviewRoster, ReviewError> {
        let roles = &self.config.roles;
        let shared_backend = roles.a == roles.b;

        let binding_for = |role: Role| -> Result<ProviderBinding, ReviewError> {
            let kind = roles.provider_for(role);
            let identity = if shared_backend && role != Role::Summarizer {
                // participants on the same backend still need distinct labels
                ProviderIdentity::new(format!(
                    "{} ({})",
                    kind.display_name(),
                    role.as_str().to_uppercase()
                ))
            } else {
                ProviderIdentity::new(kind.display_name())
            };
            self.binding(kind, identity)
        };

        let roster = ReviewRoster::new(
            binding_for(Role::A)?,
            binding_for(Role::B)?,
            binding_for(Role::Summarizer)?,
        );

        info!(
            a = roles.a.as_str(),
            b = roles.b.as_str(),
            summarizer = roles.summarizer.as_str(),
            "Provider roster ready"
        );
        Ok(roster)
    }

    /// Build a single binding for `kind`, labelled with its display name.
    pub fn build_single(&self, kind: ProviderKind) -> Result<ProviderBinding, ReviewError> {
        self.binding(kind, ProviderIdentity::new(kind.display_name()))
    }

    fn binding(
        &self,
        kind: ProviderKind,
        identity: ProviderIdentity,
    ) -> Result<ProviderBinding, ReviewError> {
        let settings = self.config.providers.get(kind);
        let api_key = self.resolve_api_key(kind, &identity)?;
        let base_url = settings.base_url_for(kind);
        let model = settings.model_for(kind).to_string();

        debug!(provider = kind.as_str(), %identity, model = %model, base_url, "Creating provider");

        let provider: Arc<dyn TextGenerationProvider> = match kind {
            ProviderKind::Anthropic => Arc::new(AnthropicProvider::new(
                identity,
                api_key,
                base_url,
                settings.max_tokens,
                settings.timeout(),
            )?),
            ProviderKind::OpenAi => Arc::new(OpenAiProvider::new(
                identity,
                api_key,
                base_url,
                settings.max_tokens,
                settings.timeout(),
            )?),
            ProviderKind::Gemini => Arc::new(
                GeminiProvider::new(
                    identity,
                    api_key,
                    base_url,
                    settings.max_tokens,
                    settings.timeout(),
                )?
                .with_concat_prompt(settings.use_concat_prompt),
            ),
        };

        Ok(ProviderBinding::new(provider, model))
    }

    /// Config file key first, then the configured environment variable.
    fn resolve_api_key(
        &self,
        kind: ProviderKind,
        identity: &ProviderIdentity,
    ) -> Result<String, ReviewError> {
        let settings = self.config.providers.get(kind);
        let env_name = settings.api_key_env_for(kind);

        settings
            .api_key
            .clone()
            .or_else(|| (self.lookup_env)(env_name))
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                ReviewError::configuration(format!(
                    "Missing API key for {identity}. Set {env_name} in the environment or config file."
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn registry<'a>(
        config: &'a FileConfig,
        vars: &'a HashMap<String, String>,
    ) -> ProviderRegistry<'a> {
        ProviderRegistry::with_env(config, move |name| vars.get(name).cloned())
    }

    #[test]
    fn test_default_roster() {
        let config = FileConfig::default();
        let vars = env(&[("ANTHROPIC_API_KEY", "a-key"), ("OPENAI_API_KEY", "o-key")]);

        let roster = registry(&config, &vars).build_roster().unwrap();
        assert_eq!(roster.label(Role::A), "Claude");
        assert_eq!(roster.label(Role::B), "GPT");
        assert_eq!(roster.label(Role::Summarizer), "Claude");
        assert_eq!(roster.binding(Role::A).model, "claude-sonnet-4-5");
        assert_eq!(roster.binding(Role::B).model, "gpt-5.2");
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let config = FileConfig::default();
        let vars = env(&[("ANTHROPIC_API_KEY", "a-key")]);

        let err = registry(&config, &vars).build_roster().unwrap_err();
        assert_eq!(err.kind(), "configuration");
        assert_eq!(
            err.user_message(),
            "Missing API key for GPT. Set OPENAI_API_KEY in the environment or config file."
        );
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let config = FileConfig::default();
        let vars = env(&[("ANTHROPIC_API_KEY", "   "), ("OPENAI_API_KEY", "o-key")]);
        assert!(registry(&config, &vars).build_roster().is_err());
    }

    #[test]
    fn test_config_key_and_custom_env_name() {
        let mut config = FileConfig::default();
        config.providers.anthropic.api_key = Some("from-file".to_string());
        config.providers.openai.api_key_env = Some("MY_OPENAI".to_string());
        let vars = env(&[("MY_OPENAI", "o-key")]);

        assert!(registry(&config, &vars).build_roster().is_ok());
    }

    #[test]
    fn test_shared_backend_gets_distinct_labels() {
        let mut config = FileConfig::default();
        config.roles.b = ProviderKind::Anthropic;
        let vars = env(&[("ANTHROPIC_API_KEY", "a-key")]);

        let roster = registry(&config, &vars).build_roster().unwrap();
        assert_eq!(roster.label(Role::A), "Claude (A)");
        assert_eq!(roster.label(Role::B), "Claude (B)");
        assert_eq!(roster.label(Role::Summarizer), "Claude");
    }

    #[test]
    fn test_build_single_gemini() {
        let mut config = FileConfig::default();
        config.providers.gemini.model = Some("gemini-2.5-pro".to_string());
        let vars = env(&[("GEMINI_API_KEY", "g-key")]);

        let binding = registry(&config, &vars)
            .build_single(ProviderKind::Gemini)
            .unwrap();
        assert_eq!(binding.identity().as_str(), "Gemini");
        assert_eq!(binding.model, "gemini-2.5-pro");
    }
}
