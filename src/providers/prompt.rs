/// The prompt template sent to the generation service.
///
/// Loaded from `prompt.txt` at compile time. Contains `{{INGREDIENTS}}` and
/// `{{PREFERENCES}}` placeholders filled in by [`build_recipe_prompt`]. The
/// layout it asks for is the one [`crate::extractors::HeadingParser`] reads.
pub const RECIPE_PROMPT: &str = include_str!("prompt.txt");

/// Fill the prompt template with the user's ingredients and preferences.
pub fn build_recipe_prompt(ingredients: &str, preferences: &str) -> String {
    let preferences = match preferences.trim() {
        "" => "None",
        trimmed => trimmed,
    };

    RECIPE_PROMPT
        .replace("{{INGREDIENTS}}", ingredients.trim())
        .replace("{{PREFERENCES}}", preferences)
}
