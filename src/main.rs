use clap::{Parser, Subcommand, ValueEnum};
use log::{error, warn};
use recipe_assistant::extractors::parser_by_name;
use recipe_assistant::render;
use recipe_assistant::{
    derive_grocery_list, AssistantConfig, Cuisine, DietaryPreference, GroceryList, HistoryStore,
    JsonFileHistory, LlmProvider, MemoryHistory, Recipe, RecipeAssistant, RecipeRequest,
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "recipe-assistant")]
#[command(about = "AI recipe & grocery list assistant", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a recipe from the ingredients you have
    Generate {
        /// Ingredients you have, comma-separated (e.g. "eggs, tomatoes, onion")
        #[arg(short, long)]
        ingredients: String,

        /// None, Vegetarian, Vegan, Gluten-Free, Keto or Low-Carb
        #[arg(short, long, default_value = "None")]
        diet: String,

        /// Any, Mediterranean, Italian, Mexican, Asian, French or Indian
        #[arg(short, long, default_value = "Any")]
        cuisine: String,

        /// google, openai, anthropic or ollama (default from config)
        #[arg(long)]
        provider: Option<String>,

        #[arg(long)]
        model: Option<String>,

        #[arg(long)]
        api_key: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Also write the shopping list to this file
        #[arg(long)]
        shopping_list: Option<PathBuf>,

        /// Do not save the recipe to history
        #[arg(long)]
        no_history: bool,
    },

    /// Parse a saved model response (stdin when no file is given)
    Parse {
        file: Option<PathBuf>,

        /// Ingredients already on hand, comma-separated
        #[arg(long, default_value = "")]
        on_hand: String,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Browse saved recipes
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List saved recipes, newest first
    List,
    /// Show one saved recipe
    Show {
        /// Number shown by `history list`
        index: usize,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Permanently delete one saved recipe
    Delete {
        /// Number shown by `history list`
        index: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Html,
}

fn render_recipe(recipe: &Recipe, grocery_list: &GroceryList, format: Format) -> String {
    match format {
        Format::Text => render::recipe_markdown(recipe, grocery_list),
        Format::Html => render::recipe_html(recipe, grocery_list),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AssistantConfig::load()?;

    match cli.command {
        Commands::Generate {
            ingredients,
            diet,
            cuisine,
            provider,
            model,
            api_key,
            timeout,
            format,
            shopping_list,
            no_history,
        } => {
            let request = RecipeRequest::new(ingredients)
                .dietary_preference(diet.parse::<DietaryPreference>()?)
                .cuisine(cuisine.parse::<Cuisine>()?);

            let mut builder = RecipeAssistant::builder().config(config);
            if let Some(provider) = provider {
                builder = builder.provider(provider.parse::<LlmProvider>()?);
            }
            if let Some(model) = model {
                builder = builder.model(model);
            }
            if let Some(key) = api_key {
                builder = builder.api_key(key);
            }
            if let Some(secs) = timeout {
                builder = builder.timeout(Duration::from_secs(secs));
            }
            if no_history {
                builder = builder.history_store(MemoryHistory::new());
            }
            let assistant = builder.build()?;

            let generated = assistant.generate(&request).await.map_err(|e| {
                error!("Error generating recipe: {}", e);
                e
            })?;

            println!(
                "{}",
                render_recipe(&generated.recipe, &generated.grocery_list, format)
            );

            if let Some(path) = shopping_list {
                if generated.grocery_list.is_empty() {
                    warn!("Shopping list is empty, not writing {}", path.display());
                } else {
                    tokio::fs::write(&path, render::shopping_list_text(&generated.grocery_list))
                        .await?;
                    eprintln!("Shopping list saved to {}", path.display());
                }
            }

            if let Some(message) = generated.history_error {
                eprintln!("Error saving recipe to history: {}", message);
            }
        }

        Commands::Parse {
            file,
            on_hand,
            format,
        } => {
            let raw = match file {
                Some(path) => tokio::fs::read_to_string(path).await?,
                None => std::io::read_to_string(std::io::stdin())?,
            };

            let parser = parser_by_name(&config.parser)?;
            let recipe = parser.parse(&raw);
            let grocery_list = derive_grocery_list(&recipe, &on_hand);
            println!("{}", render_recipe(&recipe, &grocery_list, format));
        }

        Commands::History { action } => {
            let history = JsonFileHistory::new(&config.history_path);

            match action {
                HistoryAction::List => {
                    let entries = history.entries().await?;
                    println!("{}", render::history_index(&entries));
                }
                HistoryAction::Show { index, format } => {
                    let entry = history.get(index).await?;
                    let output = match format {
                        Format::Text => render::history_entry_markdown(&entry),
                        Format::Html => render::history_entry_html(&entry),
                    };
                    println!("{}", output);
                }
                HistoryAction::Delete { index } => {
                    let removed = history.delete(index).await?;
                    println!("Deleted '{}' ({})", removed.title, removed.timestamp);
                }
            }
        }
    }

    Ok(())
}
