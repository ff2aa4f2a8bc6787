use super::open_ai::chat_completion_text;
use super::{build_recipe_prompt, http_client, RecipeGenerator};
use crate::config::ProviderConfig;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::error::Error;
use std::time::Duration;

/// Locally hosted models through Ollama's OpenAI-compatible endpoint.
/// No API key is needed.
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OllamaProvider {
    /// Create a new Ollama provider from configuration
    pub fn new(
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "http://localhost:11434".to_string());

        Ok(OllamaProvider {
            client: http_client(timeout)?,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl RecipeGenerator for OllamaProvider {
    fn provider_name(&self) -> &str {
        "ollama"
    }

    async fn generate(
        &self,
        ingredients: &str,
        preferences: &str,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "user", "content": build_recipe_prompt(ingredients, preferences)}
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;

        let response_body: Value = response.json().await?;
        debug!("Ollama response: {:?}", response_body);

        chat_completion_text(&response_body, "Ollama")
    }
}
