use crate::model::{GroceryList, Recipe};
use log::debug;
use std::collections::HashSet;

const UNITS: &[&str] = &[
    "cup", "cups", "c", "tbsp", "tbs", "tbsps", "tablespoon", "tablespoons", "tsp", "tsps",
    "teaspoon", "teaspoons", "g", "gram", "grams", "kg", "kilogram", "kilograms", "mg", "ml",
    "l", "litre", "litres", "liter", "liters", "oz", "ounce", "ounces", "lb", "lbs", "pound",
    "pounds", "pinch", "pinches", "dash", "dashes", "clove", "cloves", "can", "cans", "slice",
    "slices", "handful", "handfuls", "bunch", "bunches", "piece", "pieces",
];

const FRACTIONS: &[char] = &['½', '⅓', '⅔', '¼', '¾', '⅛', '⅕'];

/// Builds the shopping list: recipe ingredient lines that are neither on hand
/// nor repeats of an earlier line, in recipe order.
///
/// `on_hand` is the comma-separated ingredient text from the request. A line
/// is considered on hand when any on-hand item appears inside its ingredient
/// name, compared case-insensitively.
pub fn derive_grocery_list(recipe: &Recipe, on_hand: &str) -> GroceryList {
    let on_hand: Vec<String> = on_hand
        .split(',')
        .map(normalize)
        .filter(|item| !item.is_empty())
        .collect();

    let mut seen = HashSet::new();
    let mut items = Vec::new();

    for line in &recipe.ingredients {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let name = ingredient_name(line);
        if let Some(token) = on_hand.iter().find(|token| name.contains(token.as_str())) {
            debug!("Skipping '{}', '{}' is on hand", line, token);
            continue;
        }
        if !seen.insert(name) {
            continue;
        }
        items.push(line.to_string());
    }

    GroceryList::new(items)
}

/// Lowercased ingredient name with leading quantities and units removed,
/// e.g. "2 cups Flour" -> "flour". Falls back to the whole line.
pub fn ingredient_name(line: &str) -> String {
    let normalized = normalize(line);
    let tokens: Vec<&str> = normalized.split(' ').collect();

    let mut start = 0;
    let mut in_parens = false;
    while start < tokens.len() {
        let token = tokens[start];
        if in_parens {
            in_parens = !token.ends_with(')');
        } else if token.starts_with('(') {
            in_parens = !token.ends_with(')');
        } else if !(is_quantity(token) || is_unit(token) || token == "of") {
            break;
        }
        start += 1;
    }

    if start >= tokens.len() {
        return normalized;
    }
    tokens[start..].join(" ")
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn is_unit(token: &str) -> bool {
    UNITS.contains(&token.trim_end_matches(['.', ',']))
}

/// "2", "1/2", "1.5", "1-2", "½", "1½" and numbers glued to a unit ("200g")
fn is_quantity(token: &str) -> bool {
    let number_len = token
        .char_indices()
        .find(|&(_, c)| {
            !(c.is_ascii_digit() || matches!(c, '/' | '.' | '-' | '–') || FRACTIONS.contains(&c))
        })
        .map_or(token.len(), |(i, _)| i);

    if number_len == 0 {
        return false;
    }
    let number = &token[..number_len];
    if !number.chars().any(|c| c.is_ascii_digit() || FRACTIONS.contains(&c)) {
        return false;
    }

    let suffix = &token[number_len..];
    suffix.is_empty() || is_unit(suffix)
}
