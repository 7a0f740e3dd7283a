//! Simple agent implementation (LLM only, no tools)

use agent_core::{Agent, Result};
use agent_llm::{CompletionRequest, LLMProvider, Message};
use async_trait::async_trait;
use std::sync::Arc;

/// Configuration for a simple agent
#[derive(Debug, Clone)]
pub struct SimpleConfig {
    /// Model to use
    pub model: String,

    /// System prompt
    pub system_prompt: String,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Temperature for sampling
    pub temperature: f32,

    /// Nucleus sampling cutoff
    pub top_p: Option<f32>,
}

impl Default for SimpleConfig {
    fn default() -> Self {
        Self {
            model: "gpt-oss".to_string(),
            system_prompt: "You are a financial research assistant.".to_string(),
            max_tokens: 4096,
            temperature: 0.0,
            top_p: None,
        }
    }
}

/// A simple agent that answers in a single model turn without tools
///
/// Specialist sub-agents run this way: their persona prompt is the system
/// prompt and the delegated task is the user turn.
pub struct SimpleAgent {
    provider: Arc<dyn LLMProvider>,
    config: SimpleConfig,
    name: String,
}

impl SimpleAgent {
    /// Create a new simple agent
    pub fn new(provider: Arc<dyn LLMProvider>, config: SimpleConfig, name: impl Into<String>) -> Self {
        Self {
            provider,
            config,
            name: name.into(),
        }
    }

    /// Get the agent's configuration
    pub fn config(&self) -> &SimpleConfig {
        &self.config
    }
}

#[async_trait]
impl Agent for SimpleAgent {
    async fn process(&self, input: String) -> Result<String> {
        let mut builder = CompletionRequest::builder(&self.config.model)
            .messages(vec![Message::user(input)])
            .system(self.config.system_prompt.clone())
            .max_tokens(self.config.max_tokens)
            .temperature(self.config.temperature);
        if let Some(top_p) = self.config.top_p {
            builder = builder.top_p(top_p);
        }

        let response = self
            .provider
            .complete(builder.build())
            .await
            .map_err(|e| agent_core::Error::ProcessingFailed(e.to_string()))?;

        Ok(response.message.text().unwrap_or_default().to_string())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
