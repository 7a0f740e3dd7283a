//! Core Agent trait definition

use crate::Result;
use async_trait::async_trait;

/// Core trait that all agents must implement
///
/// Input and output are plain text: a research query goes in, a report comes
/// out. Agents that need richer results (transcripts, iteration counts) expose
/// them through inherent methods alongside this trait.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Process input and return the agent's final text
    async fn process(&self, input: String) -> Result<String>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl Agent for Echo {
        async fn process(&self, input: String) -> Result<String> {
            Ok(input)
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    #[tokio::test]
    async fn test_agent_is_object_safe() {
        let agent: Box<dyn Agent> = Box::new(Echo);
        assert_eq!(agent.name(), "echo");
        assert_eq!(agent.process("AAPL".to_string()).await.unwrap(), "AAPL");
    }
}
