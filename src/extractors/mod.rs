use crate::error::AssistantError;
use crate::model::Recipe;

mod heading;
mod json;

pub use self::heading::HeadingParser;
pub use self::json::JsonParser;

/// Turns a raw model response into a [`Recipe`].
///
/// Implementations are best-effort: missing sections become empty lists and
/// a missing title becomes [`crate::model::DEFAULT_TITLE`]. Parsing never fails.
pub trait ResponseParser: Send + Sync {
    fn name(&self) -> &str;
    fn parse(&self, raw: &str) -> Recipe;
}

/// Look up a parser by its configuration name; a blank name means "heading"
pub fn parser_by_name(name: &str) -> Result<Box<dyn ResponseParser>, AssistantError> {
    match name.trim().to_lowercase().as_str() {
        "" | "heading" => Ok(Box::new(HeadingParser)),
        "json" => Ok(Box::new(JsonParser)),
        other => Err(AssistantError::BuilderError(format!(
            "Unknown response parser: {}",
            other
        ))),
    }
}
