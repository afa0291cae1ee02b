//! Recipes, their ingredients and steps, and the shopping list, kept in one
//! JSON document on disk.
//!
//! The store is loaded whole, mutated in memory and written back with
//! [`RecipeStore::save`]. Nothing is written until `save` is called.

use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::fs;

pub const DEFAULT_DIFFICULTY: &str = "Media";
pub const DEFAULT_SERVINGS: u32 = 4;
pub const DEFAULT_QUANTITY: &str = "1";

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serialization(serde_json::Error),
    NotFound { kind: &'static str, id: u64 },
    Validation(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "I/O error: {}", err),
            StoreError::Serialization(err) => write!(f, "Serialization error: {}", err),
            StoreError::NotFound { kind, id } => write!(f, "{} {} not found", kind, id),
            StoreError::Validation(reason) => write!(f, "Invalid data: {}", reason),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            StoreError::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Recipe {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub time: String,
    pub difficulty: String,
    pub servings: u32,
    pub image_url: Option<String>,
    pub gluten_free: bool,
    pub created_at: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Ingredient {
    pub id: u64,
    pub recipe_id: u64,
    pub name: String,
    pub quantity: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Step {
    pub id: u64,
    pub recipe_id: u64,
    pub order: u32,
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ShoppingItem {
    pub id: u64,
    pub name: String,
    pub quantity: String,
    pub completed: bool,
    pub created_at: u64,
}

/// A recipe together with its ingredients and ordered steps.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct NewIngredient {
    pub name: String,
    #[serde(default)]
    pub quantity: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct NewRecipe {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ingredients: Option<Vec<NewIngredient>>,
    #[serde(default)]
    pub steps: Option<Vec<String>>,
}

/// Partial update. `None` leaves the field as it is; `ingredients` and
/// `steps`, when given, replace the whole list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct RecipeUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub ingredients: Option<Vec<NewIngredient>>,
    #[serde(default)]
    pub steps: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct ShoppingUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
struct IdCounters {
    recipe: u64,
    ingredient: u64,
    step: u64,
    shopping_item: u64,
}

fn next_id(counter: &mut u64) -> u64 {
    *counter += 1;
    *counter
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
struct StoreData {
    #[serde(default)]
    ids: IdCounters,
    #[serde(default)]
    recipes: Vec<Recipe>,
    #[serde(default)]
    ingredients: Vec<Ingredient>,
    #[serde(default)]
    steps: Vec<Step>,
    #[serde(default)]
    shopping_items: Vec<ShoppingItem>,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn non_empty(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

pub struct RecipeStore {
    path: PathBuf,
    data: StoreData,
}

impl RecipeStore {
    /// Loads the store from `path`. A missing file yields an empty store.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let data = match fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => StoreData::default(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No data file at {:?}, starting empty", path);
                StoreData::default()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, data })
    }

    pub async fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, json).await?;
        debug!("Saved store to {:?}", self.path);
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // --- Recipes ---

    /// Gluten-free recipes, newest first.
    pub fn list_recipes(&self) -> Vec<Recipe> {
        let mut recipes: Vec<Recipe> = self
            .data
            .recipes
            .iter()
            .filter(|r| r.gluten_free)
            .cloned()
            .collect();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        recipes
    }

    pub fn get_recipe(&self, id: u64) -> Result<RecipeDetail, StoreError> {
        let recipe = self
            .data
            .recipes
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::NotFound { kind: "recipe", id })?;

        let ingredients = self
            .data
            .ingredients
            .iter()
            .filter(|i| i.recipe_id == id)
            .cloned()
            .collect();
        let mut steps: Vec<Step> = self
            .data
            .steps
            .iter()
            .filter(|s| s.recipe_id == id)
            .cloned()
            .collect();
        steps.sort_by_key(|s| s.order);

        Ok(RecipeDetail {
            recipe,
            ingredients,
            steps,
        })
    }

    /// Creates a gluten-free recipe and returns its id.
    /// Title, ingredients and steps are required.
    pub fn create_recipe(&mut self, new: NewRecipe) -> Result<u64, StoreError> {
        let (ingredients, steps) = match (new.ingredients, new.steps) {
            (Some(ingredients), Some(steps)) if !new.title.trim().is_empty() => (ingredients, steps),
            _ => {
                return Err(StoreError::Validation(
                    "title, ingredients and steps are required".to_string(),
                ))
            }
        };

        let id = next_id(&mut self.data.ids.recipe);
        self.data.recipes.push(Recipe {
            id,
            title: new.title,
            description: new.description.unwrap_or_default(),
            time: new.time.unwrap_or_default(),
            difficulty: non_empty(new.difficulty, DEFAULT_DIFFICULTY),
            servings: new.servings.filter(|s| *s > 0).unwrap_or(DEFAULT_SERVINGS),
            image_url: new.image_url.filter(|u| !u.trim().is_empty()),
            gluten_free: true,
            created_at: now_secs(),
        });
        self.replace_ingredients(id, ingredients);
        self.replace_steps(id, steps);

        debug!("Created recipe {}", id);
        Ok(id)
    }

    pub fn update_recipe(&mut self, id: u64, update: RecipeUpdate) -> Result<(), StoreError> {
        let recipe = self
            .data
            .recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound { kind: "recipe", id })?;

        if let Some(title) = update.title {
            if title.trim().is_empty() {
                return Err(StoreError::Validation("title cannot be empty".to_string()));
            }
            recipe.title = title;
        }
        if let Some(description) = update.description {
            recipe.description = description;
        }
        if let Some(time) = update.time {
            recipe.time = time;
        }
        if let Some(difficulty) = update.difficulty {
            recipe.difficulty = difficulty;
        }
        if let Some(servings) = update.servings {
            recipe.servings = servings;
        }
        if let Some(image_url) = update.image_url {
            recipe.image_url = Some(image_url).filter(|u| !u.trim().is_empty());
        }

        if let Some(ingredients) = update.ingredients {
            self.replace_ingredients(id, ingredients);
        }
        if let Some(steps) = update.steps {
            self.replace_steps(id, steps);
        }
        Ok(())
    }

    /// Deletes a recipe with its ingredients and steps. Deleting an unknown
    /// id is not an error.
    pub fn delete_recipe(&mut self, id: u64) {
        self.data.ingredients.retain(|i| i.recipe_id != id);
        self.data.steps.retain(|s| s.recipe_id != id);
        self.data.recipes.retain(|r| r.id != id);
    }

    fn replace_ingredients(&mut self, recipe_id: u64, ingredients: Vec<NewIngredient>) {
        self.data.ingredients.retain(|i| i.recipe_id != recipe_id);
        for ingredient in ingredients {
            let id = next_id(&mut self.data.ids.ingredient);
            self.data.ingredients.push(Ingredient {
                id,
                recipe_id,
                name: ingredient.name,
                quantity: ingredient.quantity,
            });
        }
    }

    fn replace_steps(&mut self, recipe_id: u64, steps: Vec<String>) {
        self.data.steps.retain(|s| s.recipe_id != recipe_id);
        for (index, description) in steps.into_iter().enumerate() {
            let id = next_id(&mut self.data.ids.step);
            self.data.steps.push(Step {
                id,
                recipe_id,
                order: index as u32 + 1,
                description,
            });
        }
    }

    // --- Shopping list ---

    /// Shopping items, newest first.
    pub fn list_shopping(&self) -> Vec<ShoppingItem> {
        let mut items = self.data.shopping_items.clone();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        items
    }

    pub fn add_shopping_item(
        &mut self,
        name: &str,
        quantity: Option<&str>,
    ) -> Result<ShoppingItem, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::Validation("item name is required".to_string()));
        }
        let item = ShoppingItem {
            id: next_id(&mut self.data.ids.shopping_item),
            name: name.to_string(),
            quantity: non_empty(quantity.map(str::to_string), DEFAULT_QUANTITY),
            completed: false,
            created_at: now_secs(),
        };
        self.data.shopping_items.push(item.clone());
        Ok(item)
    }

    pub fn update_shopping_item(
        &mut self,
        id: u64,
        update: ShoppingUpdate,
    ) -> Result<ShoppingItem, StoreError> {
        let item = self
            .data
            .shopping_items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(StoreError::NotFound {
                kind: "shopping item",
                id,
            })?;

        if let Some(name) = update.name {
            if name.trim().is_empty() {
                return Err(StoreError::Validation("item name is required".to_string()));
            }
            item.name = name;
        }
        if let Some(quantity) = update.quantity {
            item.quantity = quantity;
        }
        if let Some(completed) = update.completed {
            item.completed = completed;
        }
        Ok(item.clone())
    }

    pub fn delete_shopping_item(&mut self, id: u64) {
        self.data.shopping_items.retain(|i| i.id != id);
    }

    /// Adds one shopping item per ingredient of the recipe.
    pub fn add_recipe_to_shopping(&mut self, recipe_id: u64) -> Result<Vec<ShoppingItem>, StoreError> {
        let ingredients: Vec<(String, String)> = self
            .data
            .ingredients
            .iter()
            .filter(|i| i.recipe_id == recipe_id)
            .map(|i| (i.name.clone(), i.quantity.clone()))
            .collect();

        if ingredients.is_empty() {
            return Err(StoreError::NotFound {
                kind: "ingredients for recipe",
                id: recipe_id,
            });
        }

        let created_at = now_secs();
        let mut added = Vec::with_capacity(ingredients.len());
        for (name, quantity) in ingredients {
            let item = ShoppingItem {
                id: next_id(&mut self.data.ids.shopping_item),
                name,
                quantity,
                completed: false,
                created_at,
            };
            self.data.shopping_items.push(item.clone());
            added.push(item);
        }
        Ok(added)
    }
}
