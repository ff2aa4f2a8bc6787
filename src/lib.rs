//! Turn the ingredients you already have into a recipe and a shopping list.
//!
//! A hosted language model writes the recipe as loosely structured prose;
//! this crate recovers the title, ingredients and instructions from it,
//! works out what still has to be bought, and keeps a history of past
//! recipes.
//!
//! ```
//! use recipe_assistant::{derive_grocery_list, extract_recipe};
//!
//! let recipe = extract_recipe("Title: Shakshuka\nIngredients:\n- 4 eggs\n- 2 tomatoes");
//! let groceries = derive_grocery_list(&recipe, "eggs");
//! assert_eq!(groceries.items(), ["2 tomatoes"]);
//! ```

pub mod assistant;
pub mod config;
pub mod error;
pub mod extractors;
pub mod grocery;
pub mod history;
pub mod model;
pub mod providers;
pub mod render;

pub use assistant::{Generated, LlmProvider, RecipeAssistant, RecipeAssistantBuilder};
pub use config::AssistantConfig;
pub use error::AssistantError;
pub use extractors::{HeadingParser, JsonParser, ResponseParser};
pub use history::{HistoryStore, JsonFileHistory, MemoryHistory};
pub use model::{
    Cuisine, DietaryPreference, GroceryList, HistoryEntry, Recipe, RecipeRequest, DEFAULT_TITLE,
};

/// Recover a [`Recipe`] from a model response using the heading rules.
///
/// Never fails: a response without a recognizable title gets
/// [`DEFAULT_TITLE`] and missing sections come back empty.
pub fn extract_recipe(raw_text: &str) -> Recipe {
    HeadingParser.parse(raw_text)
}

/// Shopping list for `recipe`, leaving out everything in `on_hand_text`.
pub fn derive_grocery_list(recipe: &Recipe, on_hand_text: &str) -> GroceryList {
    grocery::derive_grocery_list(recipe, on_hand_text)
}
