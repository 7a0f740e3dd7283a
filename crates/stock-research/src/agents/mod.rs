//! Research agent assembly
//!
//! Every agent is the same shape: a model profile, an ordered tool list, a
//! persona prompt and an iteration cap handed to [`agent_runtime::AgentExecutor`].
//! The three constructors differ only in what they put there.

pub mod enhanced;
pub mod research;
pub mod specialized;

pub use enhanced::create_enhanced_agent;
pub use research::create_research_agent;
pub use specialized::{Focus, create_specialized_agent};

use crate::error::Result;
use crate::profiles::ModelProfile;
use crate::prompts;
use agent_core::Agent;
use agent_llm::LLMProvider;
use agent_prompt::PromptRegistry;
use agent_runtime::{AgentExecutor, AgentRun, ToolAgent};
use agent_tools::{Tool, ToolRegistry};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

/// Iteration cap of the default research agent
pub const RESEARCH_MAX_ITERATIONS: usize = 10;
/// Iteration cap of the enhanced agent
pub const ENHANCED_MAX_ITERATIONS: usize = 15;
/// Iteration cap of the specialized agents
pub const SPECIALIZED_MAX_ITERATIONS: usize = 15;

/// An assembled, immutable research agent
pub struct ResearchAgent {
    agent: ToolAgent,
    profile: ModelProfile,
    templates: PromptRegistry,
}

impl ResearchAgent {
    pub(crate) fn assemble(
        name: &str,
        provider: Arc<dyn LLMProvider>,
        profile: ModelProfile,
        tools: Vec<Arc<dyn Tool>>,
        templates: PromptRegistry,
        system_prompt: String,
        max_iterations: usize,
    ) -> Result<Self> {
        let registry = Arc::new(ToolRegistry::from_tools(tools));
        let executor = AgentExecutor::builder()
            .provider(provider)
            .tool_registry(registry)
            .model(profile.model.clone())
            .temperature(profile.temperature)
            .top_p(profile.top_p)
            .system_prompt(system_prompt)
            .max_iterations(max_iterations)
            .build()?;

        info!(
            agent = %name,
            model = %profile.model,
            tools = ?executor.tool_names(),
            max_iterations,
            "Research agent assembled"
        );
        Ok(Self {
            agent: ToolAgent::new(executor, name),
            profile,
            templates,
        })
    }

    /// Run the tool loop on `query`
    pub async fn run(&self, query: &str) -> Result<AgentRun> {
        let human_turn = self.templates.render(prompts::QUERY, &json!({ "query": query }))?;
        Ok(self.agent.run(human_turn).await?)
    }

    /// Tools in advertised order
    pub fn tool_names(&self) -> Vec<String> {
        self.agent.executor().tool_names()
    }

    pub fn max_iterations(&self) -> usize {
        self.agent.executor().config().max_iterations
    }

    pub fn system_prompt(&self) -> &str {
        self.agent
            .executor()
            .config()
            .system_prompt
            .as_deref()
            .unwrap_or_default()
    }

    pub fn profile(&self) -> &ModelProfile {
        &self.profile
    }
}

#[async_trait]
impl Agent for ResearchAgent {
    async fn process(&self, input: String) -> agent_core::Result<String> {
        let run = self.run(&input).await?;
        Ok(run.output.unwrap_or_default())
    }

    fn name(&self) -> &str {
        self.agent.name()
    }
}
