//! Prompt templates for the research agents
//!
//! The persona templates live in a [`PromptRegistry`] keyed by the names in
//! [`system`]; specialized personas are assembled with a builder instead.

mod system;

pub use system::*;

use agent_prompt::{PromptRegistry, Result};

/// Register every research template with `registry`
pub fn register_prompts(registry: &PromptRegistry) -> Result<()> {
    registry.register(research_system()?);
    registry.register(enhanced_system()?);
    registry.register(query()?);
    Ok(())
}

/// A registry holding every research template
pub fn research_registry() -> Result<PromptRegistry> {
    let registry = PromptRegistry::new();
    register_prompts(&registry)?;
    Ok(registry)
}
