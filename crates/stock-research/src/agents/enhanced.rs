//! The enhanced agent: every data tool under the analytical profile

use super::{ENHANCED_MAX_ITERATIONS, ResearchAgent};
use crate::error::Result;
use crate::profiles::ModelProfile;
use crate::prompts;
use crate::tools::{DataSources, ToolCategory, base_tools, custom_tools};
use agent_llm::LLMProvider;
use serde_json::json;
use std::sync::Arc;

/// Base tools plus news, valuation, insider and options tools, capped at
/// fifteen iterations
pub fn create_enhanced_agent(
    provider: Arc<dyn LLMProvider>,
    sources: &DataSources,
) -> Result<ResearchAgent> {
    let mut tools = base_tools(sources);
    tools.extend(custom_tools(sources, ToolCategory::All));

    let names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
    let templates = prompts::research_registry()?;
    let system_prompt = templates.render(prompts::ENHANCED_SYSTEM, &json!({ "tools": names }))?;

    ResearchAgent::assemble(
        "enhanced-research-agent",
        provider,
        ModelProfile::named("analytical"),
        tools,
        templates,
        system_prompt,
        ENHANCED_MAX_ITERATIONS,
    )
}
