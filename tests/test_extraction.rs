use recipe_assistant::render::to_heading_text;
use recipe_assistant::{
    derive_grocery_list, extract_recipe, JsonParser, ResponseParser, DEFAULT_TITLE,
};

const SHAKSHUKA: &str = "Title: Shakshuka\nIngredients:\n- 4 eggs\n- 2 tomatoes\nInstructions:\n1. Heat oil\n2. Add tomatoes";

#[test]
fn test_shakshuka_end_to_end() {
    let recipe = extract_recipe(SHAKSHUKA);

    assert_eq!(recipe.title, "Shakshuka");
    assert_eq!(recipe.ingredients, vec!["4 eggs", "2 tomatoes"]);
    assert_eq!(recipe.instructions, vec!["Heat oil", "Add tomatoes"]);

    let groceries = derive_grocery_list(&recipe, "eggs");
    assert_eq!(groceries.items(), ["2 tomatoes"]);
}

#[test]
fn test_title_with_trailing_text_is_used_verbatim() {
    for (raw, expected) in [
        ("Title: Lemon Risotto", "Lemon Risotto"),
        ("TITLE:\tSpicy Noodles  ", "Spicy Noodles"),
        ("title - Green Curry", "Green Curry"),
        ("Recipe Title: Bean Chili", "Bean Chili"),
    ] {
        assert_eq!(extract_recipe(raw).title, expected, "input: {:?}", raw);
    }
}

#[test]
fn test_text_without_headers_gives_defaults() {
    let raw = "Here is a lovely idea for dinner.\nCook some pasta and add sauce.\nEnjoy!";
    let recipe = extract_recipe(raw);

    assert_eq!(recipe.title, DEFAULT_TITLE);
    assert!(recipe.ingredients.is_empty());
    assert!(recipe.instructions.is_empty());
}

#[test]
fn test_empty_input() {
    let recipe = extract_recipe("");
    assert_eq!(recipe.title, DEFAULT_TITLE);
    assert!(recipe.ingredients.is_empty());
    assert!(recipe.instructions.is_empty());
}

#[test]
fn test_missing_instructions_section() {
    let recipe = extract_recipe("Title: Salad\nIngredients:\n- lettuce\n- cucumber");
    assert_eq!(recipe.ingredients, vec!["lettuce", "cucumber"]);
    assert!(recipe.instructions.is_empty());
}

#[test]
fn test_realistic_model_response() {
    let raw = r#"
## Title: Mediterranean Veggie Frittata

A quick, protein-packed dinner that uses up what's in your fridge.

**Ingredients:**

* 6 large eggs
* 1 onion, diced
* 1/2 cup crumbled feta cheese
* 2 tbsp olive oil
* Salt and pepper to taste

**Directions:**

1. Preheat the oven to 190°C.
2. Sauté the onion in olive oil until soft.
3. Whisk the eggs, pour over the onion and top with feta.
4. Bake for 15 minutes until set.

Enjoy your meal!
"#;

    let recipe = extract_recipe(raw);
    assert_eq!(recipe.title, "Mediterranean Veggie Frittata");
    assert_eq!(recipe.ingredients.len(), 5);
    assert_eq!(recipe.ingredients[0], "6 large eggs");
    assert_eq!(recipe.instructions.len(), 5);
    assert_eq!(recipe.instructions[0], "Preheat the oven to 190°C.");
    // Trailing sign-off lands in the last open section
    assert_eq!(recipe.instructions[4], "Enjoy your meal!");

    let groceries = derive_grocery_list(&recipe, "eggs, onion, olive oil");
    assert_eq!(
        groceries.items(),
        ["1/2 cup crumbled feta cheese", "Salt and pepper to taste"]
    );
}

#[test]
fn test_extraction_is_idempotent_over_rendered_output() {
    let first = extract_recipe(SHAKSHUKA);
    let second = extract_recipe(&to_heading_text(&first));
    assert_eq!(first, second);

    let untitled = extract_recipe("Ingredients:\n- rice\nSteps:\nStep 1: Boil");
    assert_eq!(extract_recipe(&to_heading_text(&untitled)), untitled);
}

#[test]
fn test_listed_title_survives_rendering() {
    for raw in [
        "Title:\n- Garlic Soup\nIngredients:\n- garlic",
        "## Recipe Title\n1. Garlic Soup\nIngredients:\n- garlic",
    ] {
        let first = extract_recipe(raw);
        assert_eq!(first.title, "Garlic Soup");
        assert_eq!(extract_recipe(&to_heading_text(&first)), first);
    }
}

#[test]
fn test_heading_with_serving_note_keeps_ingredients() {
    let recipe =
        extract_recipe("Title: Soup\nIngredients (serves 4):\n- 2 carrots\nInstructions:\n1. Boil");

    assert_eq!(recipe.title, "Soup");
    assert_eq!(recipe.ingredients, vec!["2 carrots"]);
    assert_eq!(recipe.instructions, vec!["Boil"]);
    assert_eq!(derive_grocery_list(&recipe, "").items(), ["2 carrots"]);
}

#[test]
fn test_json_parser_is_interchangeable() {
    let structured = r#"{"title": "Shakshuka", "ingredients": ["4 eggs", "2 tomatoes"], "instructions": ["Heat oil", "Add tomatoes"]}"#;
    assert_eq!(JsonParser.parse(structured), extract_recipe(SHAKSHUKA));
    assert_eq!(JsonParser.parse(SHAKSHUKA), extract_recipe(SHAKSHUKA));
}
