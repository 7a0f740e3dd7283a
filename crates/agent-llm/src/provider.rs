//! The seam between agents and a model service

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// A chat model that can answer one turn at a time
///
/// Agents and the executor only ever talk to models through this trait, which
/// is what lets tests script the model's replies.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Short provider identifier such as `"ollama"`
    fn name(&self) -> &str;
}
