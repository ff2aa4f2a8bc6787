mod anthropic;
mod factory;
mod google;
mod ollama;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use google::GoogleProvider;
pub use ollama::OllamaProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_recipe_prompt, RECIPE_PROMPT};

use async_trait::async_trait;
use reqwest::Client;
use std::error::Error;
use std::time::Duration;

/// Unified trait for all recipe generation services
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    /// Get the provider name (e.g., "google", "openai")
    fn provider_name(&self) -> &str;

    /// Ask the model for a recipe and return its raw text answer
    async fn generate(
        &self,
        ingredients: &str,
        preferences: &str,
    ) -> Result<String, Box<dyn Error + Send + Sync>>;
}

/// HTTP client shared by the providers; every request is bounded by `timeout`.
fn http_client(timeout: Duration) -> Result<Client, Box<dyn Error + Send + Sync>> {
    Ok(Client::builder().timeout(timeout).build()?)
}
