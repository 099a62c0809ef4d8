use rig::client::completion::CompletionClientDyn;
use rig::client::{ProviderClient, ProviderValue};
use rig::completion::Prompt;
use rig::providers::{anthropic, gemini, groq, mistral, ollama, openai};
use thiserror::Error;

use crate::config::LlmConfig;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unsupported LLM provider: {0}")]
    Provider(String),

    #[error("no API key configured for provider '{0}' (set APP__LLM__API_KEY)")]
    MissingApiKey(String),

    #[error("LLM completion failed: {0}")]
    Completion(String),

    #[error("no text chunks to summarize")]
    EmptyInput,
}

fn create_provider_boxed(provider: &str, api_key: &str) -> Result<Box<dyn ProviderClient>, ServiceError> {
    let value = ProviderValue::Simple(api_key.to_string());

    let boxed: Box<dyn ProviderClient> = match provider.to_lowercase().as_str() {
        "openai" => {
            let c: openai::Client<reqwest::Client> = openai::Client::from_val(value);
            c.boxed()
        }
        "anthropic" => {
            let c: anthropic::Client<reqwest::Client> = anthropic::Client::from_val(value);
            c.boxed()
        }
        "gemini" | "google" => {
            let c: gemini::Client<reqwest::Client> = gemini::Client::from_val(value);
            c.boxed()
        }
        "groq" => {
            let c: groq::Client<reqwest::Client> = groq::Client::from_val(value);
            c.boxed()
        }
        "mistral" => {
            let c: mistral::Client<reqwest::Client> = mistral::Client::from_val(value);
            c.boxed()
        }
        "ollama" => {
            let c: ollama::Client<reqwest::Client> = ollama::Client::from_val(value);
            c.boxed()
        }
        other => return Err(ServiceError::Provider(other.to_string())),
    };

    Ok(boxed)
}

pub fn create_completion_client(
    provider: &str,
    api_key: &str,
) -> Result<Box<dyn CompletionClientDyn>, ServiceError> {
    let boxed = create_provider_boxed(provider, api_key)?;
    boxed.as_completion().ok_or_else(|| {
        ServiceError::Provider(format!("'{provider}' does not support completions"))
    })
}

/// A completion client bound to one model and temperature, built once at
/// startup from configuration and shared through `AppState`.
pub struct LlmClient {
    client: Box<dyn CompletionClientDyn>,
    model: String,
    temperature: f64,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

impl LlmClient {
    pub fn from_config(cfg: &LlmConfig) -> Result<Self, ServiceError> {
        let api_key = cfg.api_key.as_deref().unwrap_or_default();
        // Ollama is the only provider that speaks to a local daemon without a key
        if api_key.is_empty() && cfg.provider.to_lowercase() != "ollama" {
            return Err(ServiceError::MissingApiKey(cfg.provider.clone()));
        }

        let client = create_completion_client(&cfg.provider, api_key)?;
        Ok(Self {
            client,
            model: cfg.model.clone(),
            temperature: cfg.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn complete(&self, prompt: &str) -> Result<String, ServiceError> {
        let agent = self
            .client
            .agent(&self.model)
            .temperature(self.temperature)
            .build();

        agent
            .prompt(prompt)
            .await
            .map_err(|e| ServiceError::Completion(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider_rejected() {
        let err = create_completion_client("not-a-provider", "key").unwrap_err();
        assert!(matches!(err, ServiceError::Provider(_)));
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let cfg = LlmConfig {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
            temperature: 0.0,
        };
        let err = LlmClient::from_config(&cfg).unwrap_err();
        assert!(matches!(err, ServiceError::MissingApiKey(_)));
    }

    #[test]
    fn test_client_from_config() {
        let cfg = LlmConfig {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: Some("test-key".to_string()),
            temperature: 0.2,
        };
        let client = LlmClient::from_config(&cfg).unwrap();
        assert_eq!(client.model(), "gpt-4o-mini");
    }
}
