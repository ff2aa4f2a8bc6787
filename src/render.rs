//! Presentation of recipes, shopping lists and the history index.
//!
//! Everything here is a pure function of the data passed in; selecting a
//! history entry means passing that entry, not setting shared state.

use crate::model::{GroceryList, HistoryEntry, Recipe};
use html_escape::encode_text;

/// Message shown when there is nothing in the history
pub const EMPTY_HISTORY: &str = "No recipe history available.";

/// Flatten a recipe back into the heading layout the model is asked for.
///
/// Extracting the result with [`crate::extract_recipe`] gives back the same recipe.
pub fn to_heading_text(recipe: &Recipe) -> String {
    let mut out = format!("Title: {}\nIngredients:\n", recipe.title);
    for ingredient in &recipe.ingredients {
        out.push_str(&format!("- {ingredient}\n"));
    }
    out.push_str("Instructions:\n");
    for (i, step) in recipe.instructions.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, step));
    }
    out
}

/// Downloadable shopping list, one "- item" line per entry
pub fn shopping_list_text(grocery_list: &GroceryList) -> String {
    grocery_list
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Markdown recipe card followed by the shopping list
pub fn recipe_markdown(recipe: &Recipe, grocery_list: &GroceryList) -> String {
    let mut out = format!("# {}\n", recipe.title);
    write_markdown_body(&mut out, recipe, grocery_list);
    out
}

/// Markdown card for an entry picked from the history
pub fn history_entry_markdown(entry: &HistoryEntry) -> String {
    let mut out = format!(
        "# {}\n\n_Created on: {}_\n",
        entry.recipe.title, entry.timestamp
    );
    write_markdown_body(&mut out, &entry.recipe, &entry.grocery_list);
    out
}

fn write_markdown_body(out: &mut String, recipe: &Recipe, grocery_list: &GroceryList) {
    out.push_str("\n## Ingredients\n\n");
    for ingredient in &recipe.ingredients {
        out.push_str(&format!("- {ingredient}\n"));
    }

    out.push_str("\n## Instructions\n\n");
    for (i, step) in recipe.instructions.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, step));
    }

    out.push_str("\n## Shopping List\n\n");
    if grocery_list.is_empty() {
        out.push_str("Nothing to buy, you have everything.\n");
    } else {
        out.push_str(&shopping_list_text(grocery_list));
        out.push('\n');
    }
}

/// Standalone HTML recipe card. All text is escaped.
pub fn recipe_html(recipe: &Recipe, grocery_list: &GroceryList) -> String {
    html_card(recipe, grocery_list, None)
}

/// HTML card for an entry picked from the history
pub fn history_entry_html(entry: &HistoryEntry) -> String {
    html_card(&entry.recipe, &entry.grocery_list, Some(&entry.timestamp))
}

fn html_card(recipe: &Recipe, grocery_list: &GroceryList, created_on: Option<&str>) -> String {
    let mut out = String::from("<div class=\"recipe-card\">\n");
    out.push_str(&format!("  <h1>{}</h1>\n", encode_text(&recipe.title)));
    if let Some(timestamp) = created_on {
        out.push_str(&format!(
            "  <p><em>Created on: {}</em></p>\n",
            encode_text(timestamp)
        ));
    }

    out.push_str("  <h2>Ingredients</h2>\n  <ul class=\"ingredients\">\n");
    for ingredient in &recipe.ingredients {
        out.push_str(&format!(
            "    <li class=\"ingredient-item\">{}</li>\n",
            encode_text(ingredient)
        ));
    }
    out.push_str("  </ul>\n");

    out.push_str("  <h2>Instructions</h2>\n  <ol class=\"instructions\">\n");
    for step in &recipe.instructions {
        out.push_str(&format!(
            "    <li class=\"instruction-item\">{}</li>\n",
            encode_text(step)
        ));
    }
    out.push_str("  </ol>\n</div>\n");

    out.push_str("<div class=\"shopping-card\">\n  <h2>Shopping List</h2>\n  <ul>\n");
    for item in grocery_list {
        out.push_str(&format!("    <li>{}</li>\n", encode_text(item)));
    }
    out.push_str("  </ul>\n</div>\n");
    out
}

/// History listing, newest first. Each heading carries the stored position
/// that `show` and `delete` accept.
pub fn history_index(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return EMPTY_HISTORY.to_string();
    }

    let mut out = String::new();
    for (index, entry) in entries.iter().enumerate().rev() {
        out.push_str(&format!(
            "[{}] {} - {}\n    Ingredients used: {}\n",
            index, entry.title, entry.timestamp, entry.ingredients_used
        ));
        match &entry.cuisine {
            Some(cuisine) => out.push_str(&format!(
                "    Dietary preferences: {} ({} cuisine)\n",
                entry.dietary_preferences, cuisine
            )),
            None => out.push_str(&format!(
                "    Dietary preferences: {}\n",
                entry.dietary_preferences
            )),
        }
    }
    out
}
