use serde::{Deserialize, Serialize};

pub const SPOONACULAR_BASE_URL: &str = "https://api.spoonacular.com";
pub const OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2:3b-instruct-q8_0";

#[derive(Clone, Debug, Serialize)]
pub enum Provider {
    /// Spoonacular recipe database. `api_key` holds the name of the
    /// environment variable, not the key itself.
    Spoonacular { api_key: String, base_url: String },
    /// Local Ollama server.
    Ollama { base_url: String, model: String },
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Spoonacular { .. } => "spoonacular",
            Provider::Ollama { .. } => "ollama",
        }
    }
}

// --- Ollama ---

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GenerateResponse {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub done: Option<bool>,
}

// --- Spoonacular ---

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ComplexSearchResponse {
    #[serde(default)]
    pub results: Vec<SpoonacularRecipe>,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub number: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SpoonacularRecipe {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub extended_ingredients: Option<Vec<ExtendedIngredient>>,
    #[serde(default)]
    pub analyzed_instructions: Option<Vec<AnalyzedInstruction>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExtendedIngredient {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalyzedInstruction {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub steps: Vec<InstructionStep>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InstructionStep {
    pub number: u32,
    pub step: String,
}
