use log::warn;

use crate::api_connection::connection::ApiConnectionError;
use crate::api_connection::endpoints::Provider;

pub const SYSTEM_PROMPT: &str = "Eres un asistente de cocina experto. Tu objetivo es ayudar a los usuarios con:
- Recetas y técnicas culinarias
- Sustituciones de ingredientes
- Consejos para conservar alimentos
- Planificación de comidas
- Información nutricional

Responde de manera concisa, práctica y amigable.";

pub const FALLBACK_ANSWER: &str = "No se pudo obtener respuesta";

/// Frames a user question as a completion prompt for the local model.
pub fn build_prompt(user_prompt: &str) -> String {
    format!("{}\n\nUsuario: {}\n\nAsistente:", SYSTEM_PROMPT, user_prompt)
}

/// Sends a single question to the cooking assistant and returns its answer.
pub async fn ask(provider: &Provider, user_prompt: &str) -> Result<String, ApiConnectionError> {
    let user_prompt = user_prompt.trim();
    if user_prompt.is_empty() {
        return Err(ApiConnectionError::InvalidRequest(
            "a prompt is required".to_string(),
        ));
    }

    let reply = provider.generate(&build_prompt(user_prompt)).await?;
    Ok(answer_text(reply.response))
}

// The model's text is passed through untouched; only a missing or empty reply
// is replaced.
fn answer_text(response: Option<String>) -> String {
    match response {
        Some(answer) if !answer.is_empty() => answer,
        _ => {
            warn!("Model returned no answer text");
            FALLBACK_ANSWER.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_frames_user_turn() {
        let prompt = build_prompt("¿Cómo sustituyo la harina de trigo?");
        assert!(prompt.starts_with("Eres un asistente de cocina experto."));
        assert!(prompt.contains("\n\nUsuario: ¿Cómo sustituyo la harina de trigo?\n\n"));
        assert!(prompt.ends_with("Asistente:"));
    }

    #[test]
    fn test_answer_is_returned_as_received() {
        assert_eq!(answer_text(Some("  Usa harina de arroz.\n".to_string())), "  Usa harina de arroz.\n");
        assert_eq!(answer_text(Some(" \n".to_string())), " \n");
        assert_eq!(answer_text(Some(String::new())), FALLBACK_ANSWER);
        assert_eq!(answer_text(None), FALLBACK_ANSWER);
    }

    #[tokio::test]
    async fn test_empty_prompt_is_rejected() {
        let provider = Provider::ollama("http://127.0.0.1:9", "any");
        let result = ask(&provider, "   ").await;
        assert!(matches!(result, Err(ApiConnectionError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_wrong_provider_is_rejected() {
        let provider = Provider::spoonacular("SPOONACULAR_API_KEY", "https://api.spoonacular.com");
        let result = ask(&provider, "hola").await;
        assert!(matches!(result, Err(ApiConnectionError::UnsupportedProvider(_))));
    }
}
