use thiserror::Error;

/// Errors that can occur while generating, parsing or storing recipes
#[derive(Error, Debug)]
pub enum AssistantError {
    /// The request did not name any on-hand ingredient
    #[error("Please enter at least one ingredient")]
    EmptyIngredients,

    /// Unknown dietary preference, cuisine or other malformed request field
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The generation service failed or returned no usable text
    #[error("Recipe generation failed: {0}")]
    GenerationFailed(String),

    /// Reading or writing the recipe history failed
    #[error("Failed to save recipe to history: {0}")]
    PersistenceFailed(String),

    /// No history entry exists at the given position
    #[error("History entry {0} not found")]
    EntryNotFound(usize),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
