use super::{HeadingParser, ResponseParser};
use crate::model::{Recipe, DEFAULT_TITLE};
use log::debug;
use serde::Deserialize;

/// Accepts responses from models asked for structured output:
/// `{"title": ..., "ingredients": [...], "instructions": [...]}`, bare or
/// inside a ```json fence. Anything else goes through [`HeadingParser`].
pub struct JsonParser;

#[derive(Debug, Deserialize)]
struct JsonRecipe {
    #[serde(default, alias = "name")]
    title: Option<String>,
    #[serde(default)]
    ingredients: Vec<JsonItem>,
    #[serde(default, alias = "steps", alias = "directions")]
    instructions: Vec<JsonItem>,
}

/// Some models wrap each step in an object, e.g. `{"step": 1, "text": "..."}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonItem {
    Text(String),
    Object {
        #[serde(alias = "instruction", alias = "name")]
        text: String,
    },
}

impl JsonItem {
    fn into_text(self) -> String {
        match self {
            JsonItem::Text(text) => text,
            JsonItem::Object { text } => text,
        }
    }
}

impl ResponseParser for JsonParser {
    fn name(&self) -> &str {
        "json"
    }

    fn parse(&self, raw: &str) -> Recipe {
        match serde_json::from_str::<JsonRecipe>(unfence(raw)) {
            Ok(parsed) => {
                debug!("Parsed structured recipe response");
                Recipe {
                    title: parsed
                        .title
                        .map(|title| title.trim().to_string())
                        .filter(|title| !title.is_empty())
                        .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
                    ingredients: clean(parsed.ingredients),
                    instructions: clean(parsed.instructions),
                }
            }
            Err(e) => {
                debug!("Response is not a JSON recipe ({}), using heading parser", e);
                HeadingParser.parse(raw)
            }
        }
    }
}

fn clean(items: Vec<JsonItem>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.into_text().trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

fn unfence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the info string ("json") on the opening fence line
    let body = body.split_once('\n').map_or("", |(_, rest)| rest);
    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}
