//! Tool agent implementation (wraps AgentExecutor)

use crate::executor::{AgentExecutor, AgentRun};
use agent_core::{Agent, Result};
use async_trait::async_trait;

/// An agent that uses the LLM loop with tool execution
///
/// `process` yields only the final text; [`ToolAgent::run`] exposes the whole
/// [`AgentRun`] for callers that need the transcript.
pub struct ToolAgent {
    executor: AgentExecutor,
    name: String,
}

impl ToolAgent {
    /// Create a new tool agent
    pub fn new(executor: AgentExecutor, name: impl Into<String>) -> Self {
        Self {
            executor,
            name: name.into(),
        }
    }

    /// Get a reference to the underlying executor
    pub fn executor(&self) -> &AgentExecutor {
        &self.executor
    }

    /// Run the loop and return the full result
    pub async fn run(&self, input: impl Into<String>) -> Result<AgentRun> {
        self.executor.run(input).await
    }
}

#[async_trait]
impl Agent for ToolAgent {
    async fn process(&self, input: String) -> Result<String> {
        let run = self.executor.run(input).await?;
        Ok(run.output.unwrap_or_default())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
