//! Concrete LLM provider implementations
//!
//! This module contains implementations of the LLMProvider trait. The research
//! agent runs against a local Ollama service.

pub mod ollama;

pub use ollama::{OllamaConfig, OllamaProvider};
