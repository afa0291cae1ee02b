use serde::{Deserialize, Serialize};

use crate::api_connection::connection::ApiConnectionError;
use crate::api_connection::endpoints::{ComplexSearchResponse, Provider, SpoonacularRecipe};
use crate::translator::TermDictionary;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub query: String,
    pub page: u32,
    pub limit: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl SearchParams {
    pub fn new(query: &str, page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            query: query.trim().to_string(),
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.limit)
    }

    fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("query", self.query.clone()),
            ("intolerances", "gluten".to_string()),
            ("number", self.limit.to_string()),
            ("offset", self.offset().to_string()),
            ("addRecipeInformation", "true".to_string()),
            ("fillIngredients", "true".to_string()),
        ]
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchIngredient {
    pub id: Option<u64>,
    pub name: String,
    pub amount: Option<f64>,
    pub unit: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchStep {
    pub number: u32,
    pub step: String,
}

/// Compact view of an external recipe.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchRecipe {
    pub id: u64,
    pub title: String,
    pub image: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub source_url: Option<String>,
    pub summary: Option<String>,
    pub ingredients: Option<Vec<SearchIngredient>>,
    pub instructions: Option<Vec<SearchStep>>,
}

impl From<SpoonacularRecipe> for SearchRecipe {
    fn from(recipe: SpoonacularRecipe) -> Self {
        let ingredients = recipe.extended_ingredients.map(|list| {
            list.into_iter()
                .map(|ingredient| SearchIngredient {
                    id: ingredient.id,
                    name: ingredient.name,
                    amount: ingredient.amount,
                    unit: ingredient.unit,
                })
                .collect()
        });

        // Only the first instruction block is kept.
        let instructions = recipe
            .analyzed_instructions
            .and_then(|blocks| blocks.into_iter().next())
            .map(|block| {
                block
                    .steps
                    .into_iter()
                    .map(|s| SearchStep {
                        number: s.number,
                        step: s.step,
                    })
                    .collect()
            });

        Self {
            id: recipe.id,
            title: recipe.title,
            image: recipe.image,
            ready_in_minutes: recipe.ready_in_minutes,
            servings: recipe.servings,
            source_url: recipe.source_url,
            summary: recipe.summary,
            ingredients,
            instructions,
        }
    }
}

impl SearchRecipe {
    /// Copy with title, summary, ingredient names and steps run through
    /// `dictionary`.
    pub fn translated(&self, dictionary: &TermDictionary) -> SearchRecipe {
        SearchRecipe {
            title: dictionary.translate(self.title.as_str()),
            summary: self
                .summary
                .as_deref()
                .map(|summary| dictionary.translate(summary)),
            ingredients: self.ingredients.as_ref().map(|list| {
                list.iter()
                    .map(|ingredient| SearchIngredient {
                        name: dictionary.translate(ingredient.name.as_str()),
                        ..ingredient.clone()
                    })
                    .collect()
            }),
            instructions: self.instructions.as_ref().map(|steps| {
                steps
                    .iter()
                    .map(|s| SearchStep {
                        number: s.number,
                        step: dictionary.translate(s.step.as_str()),
                    })
                    .collect()
            }),
            ..self.clone()
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchPage {
    pub results: Vec<SearchRecipe>,
    pub total_results: u64,
    pub page: u32,
    pub limit: u32,
}

impl SearchPage {
    pub fn from_response(response: ComplexSearchResponse, params: &SearchParams) -> Self {
        Self {
            results: response.results.into_iter().map(SearchRecipe::from).collect(),
            total_results: response.total_results,
            page: params.page,
            limit: params.limit,
        }
    }

    pub fn translated(&self, dictionary: &TermDictionary) -> SearchPage {
        SearchPage {
            results: self.results.iter().map(|r| r.translated(dictionary)).collect(),
            ..self.clone()
        }
    }
}

/// Searches the recipe database, restricted to gluten-free results.
pub async fn search_gluten_free(
    provider: &Provider,
    params: &SearchParams,
) -> Result<SearchPage, ApiConnectionError> {
    let response: ComplexSearchResponse = provider
        .get_json("recipes/complexSearch", &params.to_query())
        .await?;
    Ok(SearchPage::from_response(response, params))
}

pub async fn recipe_details(provider: &Provider, id: u64) -> Result<SearchRecipe, ApiConnectionError> {
    let recipe: SpoonacularRecipe = provider
        .get_json(
            &format!("recipes/{}/information", id),
            &[("includeNutrition", "false".to_string())],
        )
        .await?;
    Ok(recipe.into())
}
