use anyhow::{Context, Result};
use gf_recipes::assistant;
use gf_recipes::cli::{parse_args, Command, RecipesCommand, ShoppingCommand};
use gf_recipes::config::Config;
use gf_recipes::recipe_search::{recipe_details, search_gluten_free, SearchParams};
use gf_recipes::store::{NewRecipe, RecipeStore, RecipeUpdate, ShoppingItem, ShoppingUpdate};
use gf_recipes::translator::{builtin_dictionary, translate};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tokio::fs;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_item(item: &ShoppingItem) {
    let mark = if item.completed { "x" } else { " " };
    println!("[{}] #{} {} ({})", mark, item.id, item.name, item.quantity);
}

async fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in '{}'", path.display()))
}

async fn run_recipes(store: &mut RecipeStore, command: RecipesCommand) -> Result<()> {
    match command {
        RecipesCommand::List => {
            for recipe in store.list_recipes() {
                println!(
                    "#{} {} ({}, {}, {} porciones)",
                    recipe.id, recipe.title, recipe.time, recipe.difficulty, recipe.servings
                );
            }
        }
        RecipesCommand::Show { id } => print_json(&store.get_recipe(id)?)?,
        RecipesCommand::Create { file } => {
            let new: NewRecipe = read_json_file(&file).await?;
            let id = store.create_recipe(new)?;
            store.save().await?;
            println!("Receta sin gluten creada con éxito (#{})", id);
        }
        RecipesCommand::Update { id, file } => {
            let update: RecipeUpdate = read_json_file(&file).await?;
            store.update_recipe(id, update)?;
            store.save().await?;
            println!("Receta actualizada con éxito");
        }
        RecipesCommand::Delete { id } => {
            store.delete_recipe(id);
            store.save().await?;
            println!("Receta eliminada con éxito");
        }
    }
    Ok(())
}

async fn set_completed(store: &mut RecipeStore, id: u64, completed: bool) -> Result<()> {
    let update = ShoppingUpdate {
        completed: Some(completed),
        ..Default::default()
    };
    let item = store.update_shopping_item(id, update)?;
    store.save().await?;
    print_item(&item);
    Ok(())
}

async fn run_shopping(store: &mut RecipeStore, command: ShoppingCommand) -> Result<()> {
    match command {
        ShoppingCommand::List => store.list_shopping().iter().for_each(print_item),
        ShoppingCommand::Add { name, quantity } => {
            let item = store.add_shopping_item(&name, quantity.as_deref())?;
            store.save().await?;
            print_item(&item);
        }
        ShoppingCommand::Check { id } => set_completed(store, id, true).await?,
        ShoppingCommand::Uncheck { id } => set_completed(store, id, false).await?,
        ShoppingCommand::Remove { id } => {
            store.delete_shopping_item(id);
            store.save().await?;
            println!("Item eliminado con éxito");
        }
        ShoppingCommand::FromRecipe { id } => {
            let added = store.add_recipe_to_shopping(id)?;
            store.save().await?;
            println!("Ingredientes añadidos a la lista de compra:");
            added.iter().for_each(print_item);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli_args = parse_args();
    let mut config = Config::from_env();
    if let Some(data) = cli_args.data {
        config.data_path = data;
    }
    debug!("Using config: {:?}", config);

    match cli_args.command {
        Command::Translate { text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buffer)
                        .context("Failed to read text from stdin")?;
                    buffer
                }
            };
            print!("{}", translate(text.as_str()));
            if !text.ends_with('\n') {
                println!();
            }
        }
        Command::Search {
            query,
            page,
            limit,
            translate,
        } => {
            let params = SearchParams::new(&query, page, limit);
            let results = search_gluten_free(&config.spoonacular(), &params)
                .await
                .context("Gluten-free recipe search failed")?;
            if translate {
                print_json(&results.translated(builtin_dictionary()))?;
            } else {
                print_json(&results)?;
            }
        }
        Command::Show { id, translate } => {
            let recipe = recipe_details(&config.spoonacular(), id)
                .await
                .with_context(|| format!("Failed to fetch recipe {}", id))?;
            if translate {
                print_json(&recipe.translated(builtin_dictionary()))?;
            } else {
                print_json(&recipe)?;
            }
        }
        Command::Ask { prompt } => {
            let answer = assistant::ask(&config.ollama(), &prompt)
                .await
                .context("Cooking assistant request failed")?;
            println!("{}", answer);
        }
        Command::Recipes(command) => {
            let mut store = RecipeStore::open(&config.data_path)
                .await
                .with_context(|| format!("Failed to open data file {:?}", config.data_path))?;
            run_recipes(&mut store, command).await?;
        }
        Command::Shopping(command) => {
            let mut store = RecipeStore::open(&config.data_path)
                .await
                .with_context(|| format!("Failed to open data file {:?}", config.data_path))?;
            run_shopping(&mut store, command).await?;
        }
    }

    Ok(())
}
