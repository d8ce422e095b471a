//! Completion provider implementations.
//!
//! Contains the OpenAI-style [`OpenAiCompletionProvider`], a factory
//! ([`create_provider`]) that builds it from [`CompletionSettings`], the
//! configuration-level resolution ([`resolve_provider`]) that decides whether
//! a provider is configured at all, and a connectivity check
//! ([`test_provider_connection`]).

pub mod openai;

use std::time::Duration;

use secrecy::SecretString;

use filechat_core::llm::box_provider::BoxCompletionProvider;
use filechat_types::config::{CompletionSettings, GlobalConfig};
use filechat_types::llm::{CompletionRequest, LlmError};

use self::openai::OpenAiCompletionProvider;

/// Create a [`BoxCompletionProvider`] from completion settings and a resolved API key.
pub fn create_provider(
    settings: &CompletionSettings,
    api_key: &str,
) -> Result<BoxCompletionProvider, LlmError> {
    if api_key.is_empty() {
        return Err(LlmError::AuthenticationFailed);
    }

    let provider = OpenAiCompletionProvider::new(
        SecretString::from(api_key.to_string()),
        &settings.base_url,
        settings.model.clone(),
        Duration::from_secs(settings.timeout_secs),
    )?;
    Ok(BoxCompletionProvider::new(provider))
}

/// Decide which provider, if any, the configuration selects.
///
/// Returns `Ok(None)` when there is no `[completion]` section or when the
/// API-key variable it names is unset or empty. `lookup_env` reads an
/// environment variable; production passes `std::env::var`.
pub fn resolve_provider<F>(
    config: &GlobalConfig,
    lookup_env: F,
) -> Result<Option<BoxCompletionProvider>, LlmError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(settings) = config.completion.as_ref() else {
        tracing::info!("No completion provider configured, replies will use the placeholder");
        return Ok(None);
    };

    match lookup_env(&settings.api_key_env).filter(|key| !key.trim().is_empty()) {
        Some(key) => {
            let provider = create_provider(settings, key.trim())?;
            tracing::info!(
                provider = provider.name(),
                model = provider.model(),
                base_url = %settings.base_url,
                "Completion provider configured"
            );
            Ok(Some(provider))
        }
        None => {
            tracing::warn!(
                api_key_env = %settings.api_key_env,
                "Completion section present but API key variable is not set, replies will use the placeholder"
            );
            Ok(None)
        }
    }
}

/// Test provider connectivity by sending a minimal completion request.
pub async fn test_provider_connection(provider: &BoxCompletionProvider) -> Result<(), LlmError> {
    let request = CompletionRequest {
        model: String::new(), // Provider uses its configured default
        prompt: "Hello".to_string(),
        max_tokens: 5,
        temperature: Some(0.0),
    };
    provider.complete(&request).await?;
    Ok(())
}
