use dotenv::dotenv;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::env;
use std::error::Error;
use std::fmt;

use super::endpoints::{GenerateRequest, GenerateResponse, Provider};

#[derive(Debug)]
pub enum ApiConnectionError {
    MissingApiKey(String),
    NetworkError(reqwest::Error),
    SerializationError(serde_json::Error),
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
    UnsupportedProvider(String),
    InvalidRequest(String),
}

impl fmt::Display for ApiConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiConnectionError::MissingApiKey(key_name) => {
                write!(f, "API key not found in environment: {}", key_name)
            }
            ApiConnectionError::NetworkError(err) => write!(f, "Network error: {}", err),
            ApiConnectionError::SerializationError(err) => {
                write!(f, "Serialization error: {}", err)
            }
            ApiConnectionError::ApiError { status, error_body } => {
                write!(f, "API error {}: {}", status, error_body)
            }
            ApiConnectionError::UnsupportedProvider(provider_name) => {
                write!(f, "Unsupported provider for this call: {}", provider_name)
            }
            ApiConnectionError::InvalidRequest(reason) => write!(f, "Invalid request: {}", reason),
        }
    }
}

impl Error for ApiConnectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiConnectionError::NetworkError(err) => Some(err),
            ApiConnectionError::SerializationError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiConnectionError {
    fn from(err: reqwest::Error) -> Self {
        ApiConnectionError::NetworkError(err)
    }
}

impl From<serde_json::Error> for ApiConnectionError {
    fn from(err: serde_json::Error) -> Self {
        ApiConnectionError::SerializationError(err)
    }
}

impl Provider {
    pub fn spoonacular(api_key_env_var_name: &str, base_url: &str) -> Self {
        dotenv().ok();
        Self::Spoonacular {
            api_key: api_key_env_var_name.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn ollama(base_url: &str, model: &str) -> Self {
        Self::Ollama {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// GET `path` on the Spoonacular API and decode the JSON body.
    /// The API key is appended to `query` as `apiKey`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiConnectionError> {
        match self {
            Provider::Spoonacular {
                api_key: api_key_env_var_name,
                base_url,
            } => {
                dotenv().ok();
                let actual_api_key = env::var(api_key_env_var_name)
                    .map_err(|_| ApiConnectionError::MissingApiKey(api_key_env_var_name.clone()))?;

                let url = format!("{}/{}", base_url, path.trim_start_matches('/'));
                debug!("GET {} ({} query params)", url, query.len());

                let client = Client::new();
                let response = client
                    .get(&url)
                    .query(&[("apiKey", actual_api_key.as_str())])
                    .query(query)
                    .send()
                    .await?;

                if response.status().is_success() {
                    let body = response.text().await?;
                    Ok(serde_json::from_str(&body)?)
                } else {
                    Err(api_error(response).await)
                }
            }
            other => Err(ApiConnectionError::UnsupportedProvider(other.name().to_string())),
        }
    }

    /// Non-streaming completion against Ollama's `/api/generate`.
    pub async fn generate(&self, prompt: &str) -> Result<GenerateResponse, ApiConnectionError> {
        match self {
            Provider::Ollama { base_url, model } => {
                let request = GenerateRequest {
                    model: model.clone(),
                    prompt: prompt.to_string(),
                    stream: false,
                };
                let url = format!("{}/api/generate", base_url);
                debug!("POST {} with model {}", url, model);

                let client = Client::new();
                let response = client
                    .post(&url)
                    .header("Content-Type", "application/json")
                    .json(&request)
                    .send()
                    .await?;

                if response.status().is_success() {
                    let body = response.text().await?;
                    serde_json::from_str(&body).map_err(|e| {
                        debug!("Could not decode model reply: {}. Raw body:\n{}", e, body);
                        ApiConnectionError::SerializationError(e)
                    })
                } else {
                    Err(api_error(response).await)
                }
            }
            other => Err(ApiConnectionError::UnsupportedProvider(other.name().to_string())),
        }
    }
}

async fn api_error(response: reqwest::Response) -> ApiConnectionError {
    let status = response.status();
    let error_body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read error body".to_string());
    ApiConnectionError::ApiError { status, error_body }
}
