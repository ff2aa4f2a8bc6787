use super::{build_recipe_prompt, http_client, RecipeGenerator};
use crate::config::ProviderConfig;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::error::Error;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GoogleProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl GoogleProvider {
    /// Create a new Google Gemini provider from configuration
    pub fn new(
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .ok_or("GOOGLE_API_KEY not found in config or environment")?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(GoogleProvider {
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
impl RecipeGenerator for GoogleProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    async fn generate(
        &self,
        ingredients: &str,
        preferences: &str,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&json!({
                "contents": [{
                    "parts": [{
                        "text": build_recipe_prompt(ingredients, preferences)
                    }]
                }],
                "generationConfig": {
                    "temperature": self.temperature,
                    "maxOutputTokens": self.max_tokens
                }
            }))
            .send()
            .await?;

        let status = response.status();
        let response_body: Value = response.json().await?;
        debug!("Google Gemini response: {:?}", response_body);

        if let Some(error) = response_body.get("error") {
            let error_message = error["message"].as_str().unwrap_or("Unknown error");
            return Err(format!("Google Gemini API error ({}): {}", status, error_message).into());
        }

        let recipe_text = response_body["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or("Failed to extract content from Google Gemini response")?
            .to_string();

        Ok(recipe_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn test_config(base_url: Option<String>) -> ProviderConfig {
        ProviderConfig {
            enabled: true,
            model: "gemini-2.0-flash".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            api_key: Some("test-key".to_string()),
            base_url,
        }
    }

    #[tokio::test]
    async fn test_provider_name() {
        let provider = GoogleProvider::new(&test_config(None), Duration::from_secs(5)).unwrap();
        assert_eq!(provider.provider_name(), "google");
    }

    #[tokio::test]
    async fn test_generate() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::Regex("eggs, spinach".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "candidates": [{
                        "content": {
                            "parts": [{"text": "Title: Spinach Omelette\nIngredients:\n- 3 eggs"}]
                        }
                    }]
                }"#,
            )
            .create_async()
            .await;

        let provider =
            GoogleProvider::new(&test_config(Some(server.url())), Duration::from_secs(5)).unwrap();
        let text = provider.generate("eggs, spinach", "Vegetarian").await.unwrap();

        assert!(text.starts_with("Title: Spinach Omelette"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_reports_api_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"code": 400, "message": "API key not valid"}}"#)
            .create_async()
            .await;

        let provider =
            GoogleProvider::new(&test_config(Some(server.url())), Duration::from_secs(5)).unwrap();
        let err = provider.generate("eggs", "None").await.unwrap_err();

        assert!(err.to_string().contains("API key not valid"));
    }
}
