//! Focus-specific agents that pair data tools with specialist sub-agents

use super::{ResearchAgent, SPECIALIZED_MAX_ITERATIONS};
use crate::error::Result;
use crate::profiles::ModelProfile;
use crate::prompts::{research_registry, specialized_system};
use crate::subagents::{
    SubAgentCategory, SubAgentSpec, SubAgentTool, custom_subagents, subagents_by_category,
};
use crate::tools::{DataSources, ToolCategory, base_tools, custom_tools};
use agent_llm::LLMProvider;
use agent_tools::Tool;
use std::sync::Arc;

/// Analysis focus of a specialized agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Quantitative,
    Esg,
    Options,
    Comprehensive,
}

impl Focus {
    /// Unknown names get the comprehensive setup
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "quantitative" => Focus::Quantitative,
            "esg" => Focus::Esg,
            "options" => Focus::Options,
            _ => Focus::Comprehensive,
        }
    }

    fn instructions(self) -> &'static str {
        match self {
            Focus::Quantitative => {
                "You are a quantitative research specialist focused on mathematical models, \
                 statistical analysis, and algorithmic approaches to stock analysis."
            }
            Focus::Esg => {
                "You are an ESG research specialist focused on sustainable investing and ESG \
                 factor analysis for investment decisions."
            }
            Focus::Options => {
                "You are an options specialist focused on derivatives analysis, volatility \
                 trading, and options strategies."
            }
            Focus::Comprehensive => {
                "You are a comprehensive research analyst with access to multiple specialized \
                 tools and analysis capabilities."
            }
        }
    }

    fn tool_category(self) -> ToolCategory {
        match self {
            // The technical category holds the options flow tool
            Focus::Quantitative | Focus::Options => ToolCategory::Technical,
            Focus::Esg => ToolCategory::Sentiment,
            Focus::Comprehensive => ToolCategory::All,
        }
    }

    fn subagents(self) -> Vec<SubAgentSpec> {
        let first = |category: SubAgentCategory| -> Vec<SubAgentSpec> {
            subagents_by_category(category).into_iter().take(1).collect()
        };
        match self {
            Focus::Quantitative => first(SubAgentCategory::Quantitative),
            Focus::Esg => first(SubAgentCategory::Sustainability),
            Focus::Options => first(SubAgentCategory::Derivatives),
            Focus::Comprehensive => custom_subagents().into_iter().take(3).collect(),
        }
    }
}

/// Data tools for `focus`, one delegation tool per specialist, capped at
/// fifteen iterations
pub fn create_specialized_agent(
    provider: Arc<dyn LLMProvider>,
    sources: &DataSources,
    focus: Focus,
) -> Result<ResearchAgent> {
    let profile = ModelProfile::default();
    let subagents = focus.subagents();

    let mut tools = base_tools(sources);
    tools.extend(custom_tools(sources, focus.tool_category()));
    tools.extend(subagents.iter().map(|spec| {
        Arc::new(SubAgentTool::new(spec, Arc::clone(&provider), &profile)) as Arc<dyn Tool>
    }));

    let system_prompt = specialized_system(focus.instructions(), &subagents);
    let name = format!("{}-research-agent", format!("{focus:?}").to_ascii_lowercase());

    ResearchAgent::assemble(
        &name,
        provider,
        profile,
        tools,
        research_registry()?,
        system_prompt,
        SPECIALIZED_MAX_ITERATIONS,
    )
}
