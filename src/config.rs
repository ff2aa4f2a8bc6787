use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Main assistant configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct AssistantConfig {
    /// Provider to use when none is requested explicitly
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Location of the JSON history file
    #[serde(default = "default_history_path")]
    pub history_path: String,
    /// Response parser: "heading" or "json"
    #[serde(default = "default_parser")]
    pub parser: String,
}

/// Configuration for a specific generation provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "gemini-2.0-flash", "gpt-4o-mini")
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for local, custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// Built-in settings for a provider that has no entry in the config file
    pub fn for_provider(provider_name: &str) -> Self {
        let model = match provider_name {
            "google" => "gemini-2.0-flash",
            "openai" => "gpt-4o-mini",
            "anthropic" => "claude-3-5-haiku-latest",
            "ollama" => "llama3.1",
            _ => "",
        };

        ProviderConfig {
            enabled: true,
            model: model.to_string(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: HashMap::new(),
            timeout: default_timeout(),
            history_path: default_history_path(),
            parser: default_parser(),
        }
    }
}

impl AssistantConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_ASSISTANT__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_ASSISTANT__PROVIDERS__GOOGLE__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Settings for `provider_name`, falling back to the built-in defaults
    pub fn provider(&self, provider_name: &str) -> ProviderConfig {
        self.providers
            .get(provider_name)
            .cloned()
            .unwrap_or_else(|| ProviderConfig::for_provider(provider_name))
    }
}

// Default value functions
fn default_provider() -> String {
    "google".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_timeout() -> u64 {
    60
}

fn default_history_path() -> String {
    "history/recipe_history.json".to_string()
}

fn default_parser() -> String {
    "heading".to_string()
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<AssistantConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_ASSISTANT__PROVIDERS__GOOGLE__API_KEY
        .add_source(
            Environment::with_prefix("RECIPE_ASSISTANT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
