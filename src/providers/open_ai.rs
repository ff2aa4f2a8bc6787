use super::{build_recipe_prompt, http_client, RecipeGenerator};
use crate::config::ProviderConfig;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::error::Error;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider from configuration
    pub fn new(
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or("OPENAI_API_KEY not found in config or environment")?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(OpenAIProvider {
            client: http_client(timeout)?,
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl RecipeGenerator for OpenAIProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn generate(
        &self,
        ingredients: &str,
        preferences: &str,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
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
        debug!("OpenAI response: {:?}", response_body);

        chat_completion_text(&response_body, "OpenAI")
    }
}

/// Pull the answer out of an OpenAI-compatible chat completion body.
pub(super) fn chat_completion_text(
    response_body: &Value,
    provider_label: &str,
) -> Result<String, Box<dyn Error + Send + Sync>> {
    if let Some(error) = response_body.get("error") {
        let error_message = error
            .as_str()
            .unwrap_or_else(|| error["message"].as_str().unwrap_or("Unknown error"));
        return Err(format!("{} API error: {}", provider_label, error_message).into());
    }

    let content = response_body["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| format!("Failed to extract content from {} response", provider_label))?
        .to_string();

    Ok(content)
}
