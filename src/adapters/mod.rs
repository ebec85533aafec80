// Adapters layer: concrete model backends behind the ChatModel port.

pub mod gemini;
pub mod ollama;

use crate::config::{AppConfig, BackendKind};
use crate::domain::ports::ChatModel;
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;

pub use gemini::GeminiClient;
pub use ollama::OllamaClient;

pub fn build_backend(config: &AppConfig) -> Result<Box<dyn ChatModel>> {
    match config.backend {
        BackendKind::Gemini => {
            let api_key = validate_required_field("gemini.api_key", &config.gemini.api_key)?;
            tracing::info!("Using Gemini model {}", config.gemini.model);
            Ok(Box::new(GeminiClient::new(
                config.gemini.endpoint.clone(),
                config.gemini.model.clone(),
                api_key.clone(),
            )))
        }
        BackendKind::Ollama => {
            tracing::info!(
                "Using local model {} at {}",
                config.ollama.model,
                config.ollama.base_url
            );
            Ok(Box::new(OllamaClient::new(
                config.ollama.base_url.clone(),
                config.ollama.model.clone(),
            )))
        }
    }
}
