//! Chat-model plumbing for the research agent
//!
//! Transcript and completion types, tool descriptions, the [`LLMProvider`]
//! trait, and [`providers::OllamaProvider`] for a local Ollama service.

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod providers;
pub mod tools;

pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{ContentBlock, Message, MessageContent, Role};
pub use provider::LLMProvider;
pub use tools::ToolDefinition;
