//! Query entry points that always answer with text
//!
//! Agent failures never escape this module: they become strings starting with
//! `Error:` that the UI and CLI print like any other report.

use crate::agents::{
    Focus, ResearchAgent, create_enhanced_agent, create_research_agent, create_specialized_agent,
};
use crate::config::ResearchConfig;
use crate::error::Result;
use crate::profiles::{ModelProfile, ollama_provider};
use crate::tools::DataSources;
use agent_llm::LLMProvider;
use agent_runtime::AgentRun;
use std::sync::Arc;
use tracing::{error, info};

/// Answer when the agent produced no text at all
pub const NO_RESPONSE: &str = "Error: No response received from agent.";
/// Answer when the last transcript message carries no text
pub const INVALID_FORMAT: &str = "Error: Invalid message format in agent response.";
const OLLAMA_HINT: &str = "Please ensure Ollama is running and the model is available.";

/// Final answer of a run
///
/// Prefers the run's output, then the last transcript message.
pub fn extract_answer(run: &AgentRun) -> String {
    if let Some(output) = &run.output {
        return non_blank(output).unwrap_or(NO_RESPONSE).to_string();
    }
    let Some(last) = run.messages.last() else {
        return NO_RESPONSE.to_string();
    };
    match last.text() {
        Some(text) => non_blank(text).unwrap_or(NO_RESPONSE).to_string(),
        None => INVALID_FORMAT.to_string(),
    }
}

fn non_blank(text: &str) -> Option<&str> {
    (!text.trim().is_empty()).then_some(text)
}

/// Research agent plus what is needed to assemble the enhanced variants
pub struct ResearchService {
    provider: Arc<dyn LLMProvider>,
    sources: DataSources,
    research_agent: ResearchAgent,
}

impl ResearchService {
    /// Assemble the default research agent once
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        sources: DataSources,
        profile: ModelProfile,
    ) -> Result<Self> {
        let research_agent = create_research_agent(Arc::clone(&provider), &sources, profile)?;
        Ok(Self {
            provider,
            sources,
            research_agent,
        })
    }

    /// Ollama from the configured host, Yahoo Finance and optional Alpha Vantage
    pub fn from_config(config: &ResearchConfig) -> Result<Self> {
        Self::new(
            ollama_provider(&config.ollama)?,
            DataSources::from_config(config),
            ModelProfile::from_settings(&config.ollama),
        )
    }

    pub fn research_agent(&self) -> &ResearchAgent {
        &self.research_agent
    }

    /// Run the research agent on `query`
    pub async fn run_stock_research(&self, query: &str) -> String {
        info!(query_len = query.len(), "Stock research requested");
        match self.research_agent.run(query).await {
            Ok(run) => extract_answer(&run),
            Err(e) => {
                error!(error = %e, "Stock research failed");
                format!("Error: {e}\n\n{OLLAMA_HINT}")
            }
        }
    }

    /// Run the enhanced agent (`"enhanced"`) or a specialized agent for `agent_type`
    pub async fn run_enhanced_analysis(&self, query: &str, agent_type: &str) -> String {
        info!(agent_type = %agent_type, "Enhanced analysis requested");
        let outcome = async {
            let agent = if agent_type.trim().eq_ignore_ascii_case("enhanced") {
                create_enhanced_agent(Arc::clone(&self.provider), &self.sources)?
            } else {
                create_specialized_agent(
                    Arc::clone(&self.provider),
                    &self.sources,
                    Focus::from_name(agent_type),
                )?
            };
            agent.run(query).await
        }
        .await;

        match outcome {
            Ok(run) => extract_answer(&run),
            Err(e) => {
                error!(error = %e, agent_type = %agent_type, "Enhanced analysis failed");
                format!("Error: {e}")
            }
        }
    }
}
