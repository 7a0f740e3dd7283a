//! Named model presets and the Ollama provider factory

use crate::config::OllamaSettings;
use crate::error::Result;
use agent_llm::LLMProvider;
use agent_llm::providers::{OllamaConfig, OllamaProvider};
use std::sync::Arc;

/// Model name and sampling parameters
#[derive(Debug, Clone, PartialEq)]
pub struct ModelProfile {
    pub name: &'static str,
    pub model: String,
    pub temperature: f32,
    pub top_p: Option<f32>,
}

impl ModelProfile {
    /// Look up a preset; unknown names get the `default` preset
    pub fn named(name: &str) -> Self {
        let (name, model, temperature, top_p) = match name.trim().to_ascii_lowercase().as_str() {
            "creative" => ("creative", "llama2", 0.7, Some(0.9)),
            "analytical" => ("analytical", "codellama", 0.1, Some(0.8)),
            "balanced" => ("balanced", "mistral", 0.3, Some(0.85)),
            _ => ("default", "gpt-oss", 0.0, None),
        };
        Self {
            name,
            model: model.to_string(),
            temperature,
            top_p,
        }
    }

    /// The profile configured through `OLLAMA_MODEL` and `OLLAMA_TEMPERATURE`
    pub fn from_settings(settings: &OllamaSettings) -> Self {
        Self {
            name: "env",
            model: settings.model.clone(),
            temperature: settings.temperature,
            top_p: None,
        }
    }
}

impl Default for ModelProfile {
    fn default() -> Self {
        Self::named("default")
    }
}

/// Ollama provider for the configured host with the fixed request timeout
pub fn ollama_provider(settings: &OllamaSettings) -> Result<Arc<dyn LLMProvider>> {
    let config = OllamaConfig::new(&settings.host).with_timeout(settings.timeout_secs);
    Ok(Arc::new(OllamaProvider::with_config(config)?))
}
