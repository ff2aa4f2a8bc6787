use super::ResponseParser;
use crate::model::{Recipe, DEFAULT_TITLE};
use log::debug;

const TITLE_KEYWORDS: &[&str] = &["recipe title", "recipe name", "title"];
const INGREDIENT_KEYWORDS: &[&str] = &["ingredient list", "ingredients"];
const INSTRUCTION_KEYWORDS: &[&str] = &["instructions", "directions", "steps", "method"];

/// Characters that may separate a heading keyword from its trailing text
const HEADING_PUNCTUATION: &[char] = &[':', '-', '–', '—', '*', '.', '#'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Title,
    Ingredients,
    Instructions,
}

/// Parses loosely structured prose with "Title:", "Ingredients:" and
/// "Instructions:" style headings.
pub struct HeadingParser;

impl ResponseParser for HeadingParser {
    fn name(&self) -> &str {
        "heading"
    }

    fn parse(&self, raw: &str) -> Recipe {
        let mut title: Option<String> = None;
        let mut ingredients = Vec::new();
        let mut instructions = Vec::new();
        let mut section: Option<Section> = None;
        let mut awaiting_title = false;

        for line in raw.lines().map(str::trim).filter(|line| !line.is_empty()) {
            if let Some((heading, rest)) = classify_heading(line) {
                awaiting_title = false;
                section = Some(heading);

                match heading {
                    Section::Title => {
                        if title.is_none() {
                            if rest.is_empty() {
                                awaiting_title = true;
                            } else {
                                title = Some(rest.to_string());
                            }
                        }
                    }
                    Section::Ingredients => push_item(&mut ingredients, rest),
                    Section::Instructions => push_item(&mut instructions, rest),
                }
                continue;
            }

            if awaiting_title {
                awaiting_title = false;
                let candidate = strip_list_marker(line);
                if !candidate.is_empty() {
                    title = Some(candidate.to_string());
                }
                continue;
            }

            match section {
                Some(Section::Ingredients) => push_item(&mut ingredients, line),
                Some(Section::Instructions) => push_item(&mut instructions, line),
                // Prose between the title and the first list (descriptions, serving notes)
                Some(Section::Title) | None => {}
            }
        }

        debug!(
            "Heading parser found title={:?}, {} ingredients, {} instructions",
            title,
            ingredients.len(),
            instructions.len()
        );

        Recipe {
            title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            ingredients,
            instructions,
        }
    }
}

fn push_item(items: &mut Vec<String>, line: &str) {
    let item = strip_list_marker(line);
    if !item.is_empty() {
        items.push(item.to_string());
    }
}

/// Returns the section a heading line opens together with its trailing text.
fn classify_heading(line: &str) -> Option<(Section, &str)> {
    let body = strip_heading_marks(line);
    let groups = [
        (Section::Title, TITLE_KEYWORDS),
        (Section::Ingredients, INGREDIENT_KEYWORDS),
        (Section::Instructions, INSTRUCTION_KEYWORDS),
    ];

    for (section, keywords) in groups {
        for keyword in keywords {
            let Some(prefix) = body.get(..keyword.len()) else {
                continue;
            };
            if !prefix.eq_ignore_ascii_case(keyword) {
                continue;
            }
            if let Some(rest) = heading_rest(&body[keyword.len()..]) {
                return Some((section, rest));
            }
        }
    }

    None
}

/// Drops leading `#`, `_` and emphasis `*`. A `*` followed by whitespace is a
/// bullet and stays, so list items are never read as headings.
fn strip_heading_marks(line: &str) -> &str {
    let mut rest = line;
    loop {
        let trimmed = rest.trim_start_matches(['#', '_', ' ', '\t']);
        match trimmed.strip_prefix('*') {
            Some(after) if !after.starts_with(char::is_whitespace) => rest = after,
            _ => return trimmed,
        }
    }
}

/// Text following a heading keyword, or `None` when the keyword just starts a
/// sentence. Asides such as "(serves 4)" before the colon are dropped;
/// everything after a colon is kept as written.
fn heading_rest(after: &str) -> Option<&str> {
    let mut rest = after.trim_start();
    let mut separated = rest.is_empty();

    loop {
        if rest.starts_with(HEADING_PUNCTUATION) {
            let trimmed = rest.trim_start_matches(|c: char| {
                HEADING_PUNCTUATION.contains(&c) || c.is_whitespace()
            });
            let consumed = &rest[..rest.len() - trimmed.len()];
            rest = trimmed;
            separated = true;
            if consumed.contains(':') {
                break;
            }
        } else if let Some(inner) = rest.strip_prefix(['(', '[']) {
            let Some(close) = inner.find([')', ']']) else {
                break;
            };
            let next = inner[close + 1..].trim_start();
            if !next.is_empty() && !next.starts_with(HEADING_PUNCTUATION) {
                break;
            }
            rest = next;
            separated = true;
        } else {
            break;
        }
    }

    separated.then(|| strip_decoration(rest))
}

/// Removes Markdown emphasis and heading marks around a line.
fn strip_decoration(text: &str) -> &str {
    text.trim_matches(|c: char| matches!(c, '#' | '*' | '_') || c.is_whitespace())
}

/// Removes a leading bullet ("-", "*", "•", "+"), number ("1.", "2)") or
/// "Step 3:" prefix.
fn strip_list_marker(line: &str) -> &str {
    let line = line.trim();

    for bullet in ["-", "*", "•", "+", "–"] {
        if let Some(rest) = line.strip_prefix(bullet) {
            if rest.starts_with(char::is_whitespace) {
                return rest.trim();
            }
        }
    }

    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(after) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            if after.is_empty() || after.starts_with(char::is_whitespace) {
                return after.trim();
            }
        }
    }

    if line.get(..4).is_some_and(|prefix| prefix.eq_ignore_ascii_case("step")) {
        let rest = line[4..].trim_start();
        let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits > 0 {
            let after = &rest[digits..];
            if let Some(after) = after.strip_prefix(':').or_else(|| after.strip_prefix('.')) {
                return after.trim();
            }
        }
    }

    strip_decoration(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_on_header_line() {
        let recipe = HeadingParser.parse("Title:   Lemon Pasta  \nIngredients:\n- pasta");
        assert_eq!(recipe.title, "Lemon Pasta");
    }

    #[test]
    fn test_title_on_following_line() {
        let recipe = HeadingParser.parse("## Title\n\n**Garlic Soup**\n\nIngredients:\n- garlic");
        assert_eq!(recipe.title, "Garlic Soup");
        assert_eq!(recipe.ingredients, vec!["garlic"]);
    }

    #[test]
    fn test_markdown_headings() {
        let raw = "**Title:** Tomato Rice\n\n### Ingredients:\n* 1 cup rice\n* 2 tomatoes\n\n### Directions\n1) Rinse rice\n2) Simmer";
        let recipe = HeadingParser.parse(raw);
        assert_eq!(recipe.title, "Tomato Rice");
        assert_eq!(recipe.ingredients, vec!["1 cup rice", "2 tomatoes"]);
        assert_eq!(recipe.instructions, vec!["Rinse rice", "Simmer"]);
    }

    #[test]
    fn test_keyword_inside_sentence_is_content() {
        let raw = "Instructions:\n1. Steps are easy here\n2. Titles matter";
        let recipe = HeadingParser.parse(raw);
        assert_eq!(recipe.instructions, vec!["Steps are easy here", "Titles matter"]);
    }

    #[test]
    fn test_first_title_wins() {
        let raw = "Title: First\nTitle: Second";
        assert_eq!(HeadingParser.parse(raw).title, "First");
    }

    #[test]
    fn test_empty_title_header_at_end_uses_default() {
        assert_eq!(HeadingParser.parse("Title:").title, DEFAULT_TITLE);
    }

    #[test]
    fn test_inline_ingredient_after_header() {
        let recipe = HeadingParser.parse("Ingredients: 2 eggs\n- salt");
        assert_eq!(recipe.ingredients, vec!["2 eggs", "salt"]);
    }

    #[test]
    fn test_bulleted_title_on_following_line() {
        let recipe = HeadingParser.parse("Title:\n- Garlic Soup\nIngredients:\n- garlic");
        assert_eq!(recipe.title, "Garlic Soup");

        let recipe = HeadingParser.parse("Recipe Name\n1. Garlic Soup");
        assert_eq!(recipe.title, "Garlic Soup");
    }

    #[test]
    fn test_heading_with_aside() {
        let raw = "Title: Soup\nIngredients (serves 4):\n- 2 carrots\n**Steps** [30 min]\n1. Boil";
        let recipe = HeadingParser.parse(raw);
        assert_eq!(recipe.ingredients, vec!["2 carrots"]);
        assert_eq!(recipe.instructions, vec!["Boil"]);
    }

    #[test]
    fn test_aside_after_colon_is_trailing_text() {
        let recipe = HeadingParser.parse("Title: (Vegan) Chili\nIngredients: (optional) 1 lime");
        assert_eq!(recipe.title, "(Vegan) Chili");
        assert_eq!(recipe.ingredients, vec!["(optional) 1 lime"]);
    }

    #[test]
    fn test_keyword_followed_by_aside_and_text_is_content() {
        let recipe = HeadingParser.parse("Ingredients:\n- 1 egg\nSteps (quick) mix it all");
        assert_eq!(recipe.ingredients, vec!["1 egg", "Steps (quick) mix it all"]);
    }

    #[test]
    fn test_star_bullet_is_not_a_heading() {
        let recipe = HeadingParser.parse("Ingredients:\n* Steps. ahead mix\n* 1 egg");
        assert_eq!(recipe.ingredients, vec!["Steps. ahead mix", "1 egg"]);
        assert!(recipe.instructions.is_empty());
    }

    #[test]
    fn test_strip_heading_marks() {
        assert_eq!(strip_heading_marks("**Title:**"), "Title:**");
        assert_eq!(strip_heading_marks("### _Steps_"), "Steps_");
        assert_eq!(strip_heading_marks("* Steps"), "* Steps");
    }

    #[test]
    fn test_strip_list_marker() {
        assert_eq!(strip_list_marker("- 4 eggs"), "4 eggs");
        assert_eq!(strip_list_marker("• basil"), "basil");
        assert_eq!(strip_list_marker("12. Serve"), "Serve");
        assert_eq!(strip_list_marker("Step 3: Bake"), "Bake");
        assert_eq!(strip_list_marker("2 cups flour"), "2 cups flour");
        assert_eq!(strip_list_marker("1.5 cups milk"), "1.5 cups milk");
        assert_eq!(strip_list_marker("-1 degree"), "-1 degree");
    }
}
