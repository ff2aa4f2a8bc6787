use recipe_assistant::{
    AssistantError, GroceryList, HistoryEntry, HistoryStore, JsonFileHistory, Recipe,
};
use serde_json::Value;

fn entry(title: &str) -> HistoryEntry {
    HistoryEntry {
        timestamp: "2024-05-01 18:30:00".to_string(),
        title: title.to_string(),
        ingredients_used: "eggs, tomatoes".to_string(),
        dietary_preferences: "Vegetarian".to_string(),
        cuisine: None,
        recipe: Recipe {
            title: title.to_string(),
            ingredients: vec!["4 eggs".to_string(), "2 tomatoes".to_string()],
            instructions: vec!["Heat oil".to_string()],
        },
        grocery_list: GroceryList::new(vec!["2 tomatoes".to_string()]),
    }
}

#[tokio::test]
async fn test_missing_file_is_empty_history() {
    let dir = tempfile::tempdir().unwrap();
    let history = JsonFileHistory::new(dir.path().join("recipe_history.json"));

    assert!(history.entries().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_append_creates_directories_and_writes_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history").join("recipe_history.json");
    let history = JsonFileHistory::new(&path);

    history.append(entry("Shakshuka")).await.unwrap();
    history.append(entry("Frittata")).await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    // Pretty-printed with two-space indentation
    assert!(content.starts_with("[\n  {\n    \"timestamp\""));

    let json: Value = serde_json::from_str(&content).unwrap();
    let array = json.as_array().unwrap();
    assert_eq!(array.len(), 2);

    let first = &array[0];
    assert_eq!(first["timestamp"], "2024-05-01 18:30:00");
    assert_eq!(first["title"], "Shakshuka");
    assert_eq!(first["ingredients_used"], "eggs, tomatoes");
    assert_eq!(first["dietary_preferences"], "Vegetarian");
    assert_eq!(first["recipe"]["title"], "Shakshuka");
    assert_eq!(first["recipe"]["ingredients"][1], "2 tomatoes");
    assert_eq!(first["recipe"]["instructions"][0], "Heat oil");
    assert_eq!(first["grocery_list"][0], "2 tomatoes");
    assert!(first.get("cuisine").is_none());
    assert_eq!(array[1]["title"], "Frittata");
}

#[tokio::test]
async fn test_reads_file_written_by_earlier_versions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recipe_history.json");
    std::fs::write(
        &path,
        r#"[
  {
    "timestamp": "2024-03-10 09:15:42",
    "title": "Veggie Omelette",
    "ingredients_used": "eggs, spinach",
    "dietary_preferences": "None",
    "recipe": {
      "title": "Veggie Omelette",
      "ingredients": ["3 eggs", "1 cup spinach"],
      "instructions": ["Whisk eggs", "Cook with spinach"]
    },
    "grocery_list": []
  }
]"#,
    )
    .unwrap();

    let history = JsonFileHistory::new(&path);
    let entry = history.get(0).await.unwrap();

    assert_eq!(entry.title, "Veggie Omelette");
    assert_eq!(entry.recipe.instructions.len(), 2);
    assert!(entry.grocery_list.is_empty());
    assert!(entry.cuisine.is_none());
}

#[tokio::test]
async fn test_corrupt_file_reads_as_empty_and_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recipe_history.json");
    std::fs::write(&path, "{ not json").unwrap();

    let history = JsonFileHistory::new(&path);
    assert!(history.entries().await.unwrap().is_empty());

    history.append(entry("Shakshuka")).await.unwrap();
    let entries = history.entries().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "Shakshuka");
}

#[tokio::test]
async fn test_delete_removes_entry_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recipe_history.json");
    let history = JsonFileHistory::new(&path);

    history.append(entry("First")).await.unwrap();
    history.append(entry("Second")).await.unwrap();
    history.append(entry("Third")).await.unwrap();

    let removed = history.delete(1).await.unwrap();
    assert_eq!(removed.title, "Second");

    let reopened = JsonFileHistory::new(&path);
    let titles: Vec<String> = reopened
        .entries()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, vec!["First", "Third"]);

    assert!(matches!(
        reopened.delete(5).await,
        Err(AssistantError::EntryNotFound(5))
    ));
}

#[tokio::test]
async fn test_unwritable_location_is_persistence_failure() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "a file, not a directory").unwrap();

    let history = JsonFileHistory::new(blocker.join("recipe_history.json"));
    let result = history.append(entry("Shakshuka")).await;

    assert!(matches!(result, Err(AssistantError::PersistenceFailed(_))));
}
