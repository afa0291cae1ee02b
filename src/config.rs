use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::api_connection::endpoints::{
    Provider, DEFAULT_OLLAMA_MODEL, OLLAMA_BASE_URL, SPOONACULAR_BASE_URL,
};

// Environment variable names
pub const SPOONACULAR_API_KEY_ENV_VAR: &str = "SPOONACULAR_API_KEY";
pub const SPOONACULAR_BASE_URL_ENV_VAR: &str = "SPOONACULAR_BASE_URL";
pub const OLLAMA_URL_ENV_VAR: &str = "OLLAMA_URL";
pub const OLLAMA_MODEL_ENV_VAR: &str = "OLLAMA_MODEL";
pub const DATA_PATH_ENV_VAR: &str = "GF_RECIPES_DATA";

pub const DEFAULT_DATA_PATH: &str = "recetas.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub spoonacular_api_key_env_var: String,
    pub spoonacular_base_url: String,
    pub ollama_url: String,
    pub ollama_model: String,
    pub data_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spoonacular_api_key_env_var: SPOONACULAR_API_KEY_ENV_VAR.to_string(),
            spoonacular_base_url: SPOONACULAR_BASE_URL.to_string(),
            ollama_url: OLLAMA_BASE_URL.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

impl Config {
    /// Reads `.env` (if any) and the process environment. The Spoonacular key
    /// itself is only read when a request is made.
    pub fn from_env() -> Self {
        dotenv().ok();
        let defaults = Self::default();
        Self {
            spoonacular_api_key_env_var: defaults.spoonacular_api_key_env_var,
            spoonacular_base_url: env_or(SPOONACULAR_BASE_URL_ENV_VAR, defaults.spoonacular_base_url),
            ollama_url: env_or(OLLAMA_URL_ENV_VAR, defaults.ollama_url),
            ollama_model: env_or(OLLAMA_MODEL_ENV_VAR, defaults.ollama_model),
            data_path: env::var(DATA_PATH_ENV_VAR)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
        }
    }

    pub fn spoonacular(&self) -> Provider {
        Provider::spoonacular(&self.spoonacular_api_key_env_var, &self.spoonacular_base_url)
    }

    pub fn ollama(&self) -> Provider {
        Provider::ollama(&self.ollama_url, &self.ollama_model)
    }
}

fn env_or(var: &str, default: String) -> String {
    env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}
