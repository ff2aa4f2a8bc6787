use std::time::Duration;

use log::{debug, error, info, warn};

use crate::config::AssistantConfig;
use crate::extractors::{parser_by_name, ResponseParser};
use crate::grocery::derive_grocery_list;
use crate::history::{HistoryStore, JsonFileHistory};
use crate::model::{GroceryList, HistoryEntry, Recipe, RecipeRequest};
use crate::providers::{ProviderFactory, RecipeGenerator};
use crate::AssistantError;

/// Hosted model used to write the recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Google,
    OpenAI,
    Anthropic,
    Ollama,
}

impl LlmProvider {
    /// Convert to provider name string used by the factory
    pub fn as_str(&self) -> &str {
        match self {
            LlmProvider::Google => "google",
            LlmProvider::OpenAI => "openai",
            LlmProvider::Anthropic => "anthropic",
            LlmProvider::Ollama => "ollama",
        }
    }
}

impl std::str::FromStr for LlmProvider {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" | "gemini" => Ok(LlmProvider::Google),
            "openai" => Ok(LlmProvider::OpenAI),
            "anthropic" | "claude" => Ok(LlmProvider::Anthropic),
            "ollama" => Ok(LlmProvider::Ollama),
            other => Err(AssistantError::InvalidRequest(format!(
                "unknown provider '{}' (available: {})",
                other,
                ProviderFactory::available_providers().join(", ")
            ))),
        }
    }
}

/// Result of one successful generation
#[derive(Debug, Clone)]
pub struct Generated {
    pub recipe: Recipe,
    pub grocery_list: GroceryList,
    /// The entry that was (or failed to be) written to history
    pub entry: HistoryEntry,
    /// Set when the recipe was produced but could not be saved
    pub history_error: Option<String>,
}

/// Runs the generate → extract → derive → save pipeline
pub struct RecipeAssistant {
    generator: Box<dyn RecipeGenerator>,
    parser: Box<dyn ResponseParser>,
    history: Box<dyn HistoryStore>,
}

impl RecipeAssistant {
    /// Creates a new builder for the assistant
    ///
    /// # Example
    /// ```
    /// use recipe_assistant::{MemoryHistory, RecipeAssistant};
    ///
    /// let builder = RecipeAssistant::builder().history_store(MemoryHistory::new());
    /// ```
    pub fn builder() -> RecipeAssistantBuilder {
        RecipeAssistantBuilder::default()
    }

    pub fn new(
        generator: Box<dyn RecipeGenerator>,
        parser: Box<dyn ResponseParser>,
        history: Box<dyn HistoryStore>,
    ) -> Self {
        RecipeAssistant {
            generator,
            parser,
            history,
        }
    }

    /// Generate a recipe for `request`, derive its shopping list and save it.
    ///
    /// # Errors
    /// - [`AssistantError::EmptyIngredients`] before any network call
    /// - [`AssistantError::GenerationFailed`] when the provider fails; nothing
    ///   is parsed or saved in that case
    ///
    /// A history write failure does not fail the call; it is reported in
    /// [`Generated::history_error`].
    pub async fn generate(&self, request: &RecipeRequest) -> Result<Generated, AssistantError> {
        request.validate()?;

        let preferences = request.preferences();
        info!(
            "Generating recipe with {} for '{}' ({})",
            self.generator.provider_name(),
            request.ingredients,
            preferences
        );

        let raw = self
            .generator
            .generate(&request.ingredients, &preferences)
            .await
            .map_err(|e| {
                error!("Recipe generation failed: {}", e);
                AssistantError::GenerationFailed(e.to_string())
            })?;
        debug!("Raw model response:\n{}", raw);

        let recipe = self.parser.parse(&raw);
        let grocery_list = derive_grocery_list(&recipe, &request.ingredients);
        let entry = HistoryEntry::new(request, recipe.clone(), grocery_list.clone());

        let history_error = match self.history.append(entry.clone()).await {
            Ok(()) => None,
            Err(e) => {
                warn!("Recipe '{}' was not saved: {}", recipe.title, e);
                Some(e.to_string())
            }
        };

        Ok(Generated {
            recipe,
            grocery_list,
            entry,
            history_error,
        })
    }

    /// Saved entries, oldest first
    pub async fn history(&self) -> Result<Vec<HistoryEntry>, AssistantError> {
        self.history.entries().await
    }

    pub async fn history_entry(&self, index: usize) -> Result<HistoryEntry, AssistantError> {
        self.history.get(index).await
    }

    /// Permanently remove a saved entry
    pub async fn delete_history_entry(&self, index: usize) -> Result<HistoryEntry, AssistantError> {
        let removed = self.history.delete(index).await?;
        info!("Deleted '{}' from history", removed.title);
        Ok(removed)
    }
}

/// Builder for configuring a [`RecipeAssistant`]
#[derive(Default)]
pub struct RecipeAssistantBuilder {
    config: Option<AssistantConfig>,
    provider: Option<LlmProvider>,
    api_key: Option<String>,
    model: Option<String>,
    timeout: Option<Duration>,
    generator: Option<Box<dyn RecipeGenerator>>,
    parser: Option<Box<dyn ResponseParser>>,
    history: Option<Box<dyn HistoryStore>>,
}

impl RecipeAssistantBuilder {
    /// Start from a loaded configuration instead of the built-in defaults
    pub fn config(mut self, config: AssistantConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a specific provider instead of the configured default
    pub fn provider(mut self, provider: LlmProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the API key for the provider, overriding config and environment
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set a timeout for the generation request
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Use an already constructed generator (provider settings are ignored)
    pub fn generator(mut self, generator: impl RecipeGenerator + 'static) -> Self {
        self.generator = Some(Box::new(generator));
        self
    }

    pub fn parser(mut self, parser: impl ResponseParser + 'static) -> Self {
        self.parser = Some(Box::new(parser));
        self
    }

    /// Store history somewhere other than the configured JSON file
    pub fn history_store(mut self, history: impl HistoryStore + 'static) -> Self {
        self.history = Some(Box::new(history));
        self
    }

    /// Build the assistant
    ///
    /// # Errors
    /// Returns [`AssistantError::BuilderError`] when the provider cannot be
    /// created (unknown name, disabled, missing API key) or the configured
    /// parser is unknown.
    pub fn build(self) -> Result<RecipeAssistant, AssistantError> {
        let config = self.config.unwrap_or_default();

        let generator = match self.generator {
            Some(generator) => generator,
            None => {
                let provider_name = self
                    .provider
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_else(|| config.default_provider.clone());

                let mut provider_config = config.provider(&provider_name);
                if let Some(key) = self.api_key {
                    provider_config.api_key = Some(key);
                }
                if let Some(model) = self.model {
                    provider_config.model = model;
                }
                let timeout = self
                    .timeout
                    .unwrap_or_else(|| Duration::from_secs(config.timeout));

                ProviderFactory::create(&provider_name, &provider_config, timeout)
                    .map_err(|e| AssistantError::BuilderError(e.to_string()))?
            }
        };

        let parser = match self.parser {
            Some(parser) => parser,
            None => parser_by_name(&config.parser)?,
        };

        let history: Box<dyn HistoryStore> = match self.history {
            Some(history) => history,
            None => Box::new(JsonFileHistory::new(&config.history_path)),
        };

        debug!(
            "Built assistant with provider '{}' and parser '{}'",
            generator.provider_name(),
            parser.name()
        );

        Ok(RecipeAssistant::new(generator, parser, history))
    }
}
