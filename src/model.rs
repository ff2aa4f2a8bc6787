use crate::error::AssistantError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Title used when the model response does not name the dish
pub const DEFAULT_TITLE: &str = "Untitled Recipe";

/// Dietary restriction the generated recipe must respect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DietaryPreference {
    #[default]
    None,
    Vegetarian,
    Vegan,
    GlutenFree,
    Keto,
    LowCarb,
}

impl DietaryPreference {
    pub const ALL: [DietaryPreference; 6] = [
        DietaryPreference::None,
        DietaryPreference::Vegetarian,
        DietaryPreference::Vegan,
        DietaryPreference::GlutenFree,
        DietaryPreference::Keto,
        DietaryPreference::LowCarb,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DietaryPreference::None => "None",
            DietaryPreference::Vegetarian => "Vegetarian",
            DietaryPreference::Vegan => "Vegan",
            DietaryPreference::GlutenFree => "Gluten-Free",
            DietaryPreference::Keto => "Keto",
            DietaryPreference::LowCarb => "Low-Carb",
        }
    }
}

impl fmt::Display for DietaryPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DietaryPreference {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_choice(s);
        Self::ALL
            .into_iter()
            .find(|pref| normalize_choice(pref.label()) == wanted)
            .ok_or_else(|| {
                AssistantError::InvalidRequest(format!("unknown dietary preference '{}'", s))
            })
    }
}

/// Cooking style hint passed along with the dietary preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cuisine {
    #[default]
    Any,
    Mediterranean,
    Italian,
    Mexican,
    Asian,
    French,
    Indian,
}

impl Cuisine {
    pub const ALL: [Cuisine; 7] = [
        Cuisine::Any,
        Cuisine::Mediterranean,
        Cuisine::Italian,
        Cuisine::Mexican,
        Cuisine::Asian,
        Cuisine::French,
        Cuisine::Indian,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Cuisine::Any => "Any",
            Cuisine::Mediterranean => "Mediterranean",
            Cuisine::Italian => "Italian",
            Cuisine::Mexican => "Mexican",
            Cuisine::Asian => "Asian",
            Cuisine::French => "French",
            Cuisine::Indian => "Indian",
        }
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Cuisine {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_choice(s);
        Self::ALL
            .into_iter()
            .find(|cuisine| normalize_choice(cuisine.label()) == wanted)
            .ok_or_else(|| AssistantError::InvalidRequest(format!("unknown cuisine '{}'", s)))
    }
}

/// "Gluten-Free", "gluten_free" and "gluten free" all name the same choice.
fn normalize_choice(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

/// One user request: what is in the kitchen and how it should be cooked
#[derive(Debug, Clone, Default)]
pub struct RecipeRequest {
    /// Comma-separated on-hand ingredients, exactly as typed
    pub ingredients: String,
    pub dietary_preference: DietaryPreference,
    pub cuisine: Option<Cuisine>,
}

impl RecipeRequest {
    pub fn new(ingredients: impl Into<String>) -> Self {
        RecipeRequest {
            ingredients: ingredients.into(),
            ..Default::default()
        }
    }

    pub fn dietary_preference(mut self, preference: DietaryPreference) -> Self {
        self.dietary_preference = preference;
        self
    }

    pub fn cuisine(mut self, cuisine: Cuisine) -> Self {
        self.cuisine = Some(cuisine);
        self
    }

    /// Rejects requests that name no ingredient at all
    pub fn validate(&self) -> Result<(), AssistantError> {
        if self.ingredients.split(',').all(|item| item.trim().is_empty()) {
            return Err(AssistantError::EmptyIngredients);
        }
        Ok(())
    }

    /// Preference string sent to the model, e.g. "Vegan, Italian cuisine"
    pub fn preferences(&self) -> String {
        match self.cuisine {
            Some(cuisine) if cuisine != Cuisine::Any => {
                format!("{}, {} cuisine", self.dietary_preference, cuisine)
            }
            _ => self.dietary_preference.to_string(),
        }
    }
}

/// Recipe recovered from a model response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl Default for Recipe {
    fn default() -> Self {
        Recipe {
            title: DEFAULT_TITLE.to_string(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
        }
    }
}

/// Ingredient lines still to buy, in recipe order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroceryList(Vec<String>);

impl GroceryList {
    pub fn new(items: Vec<String>) -> Self {
        GroceryList(items)
    }

    pub fn items(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a GroceryList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One persisted generation, in the on-disk history layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Local time, "YYYY-MM-DD HH:MM:SS"
    pub timestamp: String,
    pub title: String,
    pub ingredients_used: String,
    pub dietary_preferences: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    pub recipe: Recipe,
    #[serde(default)]
    pub grocery_list: GroceryList,
}

impl HistoryEntry {
    pub fn new(request: &RecipeRequest, recipe: Recipe, grocery_list: GroceryList) -> Self {
        HistoryEntry {
            timestamp: chrono::Local::now()
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            title: recipe.title.clone(),
            ingredients_used: request.ingredients.clone(),
            dietary_preferences: request.dietary_preference.to_string(),
            cuisine: request
                .cuisine
                .filter(|cuisine| *cuisine != Cuisine::Any)
                .map(|cuisine| cuisine.to_string()),
            recipe,
            grocery_list,
        }
    }
}
