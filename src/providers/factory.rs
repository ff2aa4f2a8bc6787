use crate::config::ProviderConfig;
use crate::providers::{
    AnthropicProvider, GoogleProvider, OllamaProvider, OpenAIProvider, RecipeGenerator,
};
use std::error::Error;
use std::time::Duration;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Box<dyn RecipeGenerator>, Box<dyn Error + Send + Sync>> {
        // Validate that provider is enabled
        if !config.enabled {
            return Err(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )
            .into());
        }

        match provider_name {
            "google" => Ok(Box::new(GoogleProvider::new(config, timeout)?)),
            "openai" => Ok(Box::new(OpenAIProvider::new(config, timeout)?)),
            "anthropic" => Ok(Box::new(AnthropicProvider::new(config, timeout)?)),
            "ollama" => Ok(Box::new(OllamaProvider::new(config, timeout)?)),
            _ => Err(format!(
                "Unknown provider: {} (available: {})",
                provider_name,
                Self::available_providers().join(", ")
            )
            .into()),
        }
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["google", "openai", "anthropic", "ollama"]
    }
}
