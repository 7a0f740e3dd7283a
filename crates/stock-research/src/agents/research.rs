//! The default research agent: three data tools and the analyst persona

use super::{RESEARCH_MAX_ITERATIONS, ResearchAgent};
use crate::error::Result;
use crate::profiles::ModelProfile;
use crate::prompts;
use crate::tools::{DataSources, base_tools};
use agent_llm::LLMProvider;
use serde_json::json;
use std::sync::Arc;

/// Price, financial statement and technical indicator tools under the
/// research persona, capped at ten iterations
pub fn create_research_agent(
    provider: Arc<dyn LLMProvider>,
    sources: &DataSources,
    profile: ModelProfile,
) -> Result<ResearchAgent> {
    let templates = prompts::research_registry()?;
    let system_prompt = templates.render(prompts::RESEARCH_SYSTEM, &json!({}))?;
    ResearchAgent::assemble(
        "research-agent",
        provider,
        profile,
        base_tools(sources),
        templates,
        system_prompt,
        RESEARCH_MAX_ITERATIONS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedProvider, text_response, tool_call};
    use crate::tools::test_support::sources_with_closes;
    use agent_core::Agent;
    use agent_runtime::RunOutcome;

    #[test]
    fn test_assembly() {
        let provider = Arc::new(ScriptedProvider::replying(&[]));
        let agent =
            create_research_agent(provider, &sources_with_closes(vec![]), ModelProfile::default())
                .unwrap();

        assert_eq!(agent.name(), "research-agent");
        assert_eq!(agent.max_iterations(), 10);
        assert_eq!(
            agent.tool_names(),
            vec!["get_stock_price", "get_financial_statements", "get_technical_indicators"]
        );
        assert!(agent.system_prompt().starts_with("You are an elite stock research analyst"));
    }

    #[tokio::test]
    async fn test_run_feeds_tool_observation_back() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok(tool_call("call_1", "get_stock_price", json!({"symbol": "AAPL"}))),
            Ok(text_response("AAPL trades at 101.00. HOLD.")),
        ]));
        let agent = create_research_agent(
            provider.clone(),
            &sources_with_closes(vec![100.0, 101.0]),
            ModelProfile::named("balanced"),
        )
        .unwrap();

        let run = agent.run("Analyze AAPL").await.unwrap();
        assert_eq!(run.outcome, RunOutcome::Completed);
        assert_eq!(run.output.as_deref(), Some("AAPL trades at 101.00. HOLD."));
        assert_eq!(run.iterations, 2);

        let requests = provider.requests();
        assert_eq!(requests[0].model, "mistral");
        assert_eq!(requests[0].top_p, Some(0.85));
        assert_eq!(requests[0].messages[0].text(), Some("Analyze AAPL"));

        let observation = requests[1]
            .messages
            .iter()
            .find(|m| m.is_tool_result())
            .unwrap();
        let serialized = serde_json::to_string(observation).unwrap();
        assert!(serialized.contains("current_price"));
    }
}
