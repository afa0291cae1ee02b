use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON data file (defaults to $GF_RECIPES_DATA or recetas.json)
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate cooking vocabulary from English to Spanish (reads stdin if TEXT is omitted)
    Translate { text: Option<String> },
    /// Search the recipe database for gluten-free recipes
    Search {
        #[arg(default_value = "")]
        query: String,
        #[arg(short, long)]
        page: Option<u32>,
        #[arg(short, long)]
        limit: Option<u32>,
        /// Translate titles, ingredients and steps to Spanish
        #[arg(short, long)]
        translate: bool,
    },
    /// Show one recipe from the recipe database
    Show {
        id: u64,
        #[arg(short, long)]
        translate: bool,
    },
    /// Ask the cooking assistant a question
    Ask { prompt: String },
    /// Manage saved recipes
    #[command(subcommand)]
    Recipes(RecipesCommand),
    /// Manage the shopping list
    #[command(subcommand)]
    Shopping(ShoppingCommand),
}

#[derive(Subcommand, Debug)]
pub enum RecipesCommand {
    List,
    Show { id: u64 },
    /// Create a recipe from a JSON file
    Create { file: PathBuf },
    /// Update a recipe from a JSON file holding the fields to change
    Update { id: u64, file: PathBuf },
    Delete { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum ShoppingCommand {
    List,
    Add {
        name: String,
        #[arg(short, long)]
        quantity: Option<String>,
    },
    /// Mark an item as bought
    Check { id: u64 },
    Uncheck { id: u64 },
    Remove { id: u64 },
    /// Add every ingredient of a saved recipe to the list
    FromRecipe { id: u64 },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
