//! Specialist sub-agents and the tool that delegates to them
//!
//! A sub-agent is a persona prompt run as a single model turn. Coordinating
//! agents reach it through an `ask_<name>` tool taking a `task`.

use crate::profiles::ModelProfile;
use agent_core::{Agent, Result as AgentResult};
use agent_llm::LLMProvider;
use agent_runtime::{SimpleAgent, SimpleConfig};
use agent_tools::{Tool, error_payload, required_str};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

/// Name, one-line description and persona prompt of a specialist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubAgentSpec {
    pub name: String,
    pub description: String,
    pub prompt: String,
}

/// Define a specialist
pub fn create_custom_subagent(
    name: impl Into<String>,
    description: impl Into<String>,
    prompt: impl Into<String>,
) -> SubAgentSpec {
    SubAgentSpec {
        name: name.into(),
        description: description.into(),
        prompt: prompt.into(),
    }
}

const ESG_PROMPT: &str = "You are an ESG (Environmental, Social, and Governance) specialist with expertise in
sustainable investing and corporate responsibility analysis.

Focus on:
- Environmental impact and sustainability practices
- Social responsibility and stakeholder relationships
- Corporate governance structure and ethics
- ESG scores and ratings from major providers
- Regulatory compliance and ESG risks
- Integration of ESG factors into investment decisions

Always provide specific ESG metrics, scores, and cite recognized ESG frameworks
(GRI, SASB, TCFD, UN Global Compact).";

const SECTOR_PROMPT: &str = "You are a sector specialist with deep knowledge of industry dynamics,
competitive positioning, and sector-specific metrics.

Focus on:
- Industry trends and cyclical patterns
- Competitive landscape analysis
- Sector-specific valuation metrics
- Regulatory environment impacts
- Supply chain and operational factors
- Peer comparison and relative valuation

Always provide industry context, peer comparisons, and sector-specific insights
that inform investment decisions.";

const MACRO_PROMPT: &str = "You are a macroeconomic analyst specializing in how economic conditions
affect individual securities and sectors.

Focus on:
- Interest rate environment and monetary policy
- Inflation trends and commodity prices
- Currency movements and international trade
- GDP growth and economic cycles
- Government fiscal policy impacts
- Global economic trends and geopolitical risks

Always connect macroeconomic conditions to specific investment implications
and provide forward-looking economic analysis.";

const QUANT_PROMPT: &str = "You are a quantitative analyst specializing in mathematical models,
statistical analysis, and algorithmic trading strategies.

Focus on:
- Statistical analysis and backtesting
- Factor models and risk attribution
- Volatility analysis and correlation studies
- Monte Carlo simulations and scenario analysis
- Machine learning applications in finance
- Algorithmic trading signals and strategies

Always provide quantitative metrics, statistical significance tests,
and model-based insights with appropriate confidence intervals.";

const OPTIONS_PROMPT: &str = "You are an options specialist with expertise in derivatives,
volatility trading, and complex option strategies.

Focus on:
- Implied volatility analysis and skew
- Options pricing models (Black-Scholes, binomial)
- Greeks analysis (delta, gamma, theta, vega)
- Options strategies for different market conditions
- Risk management using derivatives
- Earnings and event-driven options plays

Always provide specific options strategies, pricing analysis,
and risk/reward profiles for recommendations.";

const CREDIT_PROMPT: &str = "You are a credit analyst specializing in corporate bonds,
credit risk assessment, and fixed income analysis.

Focus on:
- Credit ratings and rating agency analysis
- Bond pricing and yield analysis
- Credit spreads and default probabilities
- Covenant analysis and security features
- Capital structure and debt capacity
- Recovery rates and loss given default

Always provide credit metrics, rating justifications,
and fixed income investment recommendations.";

/// The six built-in specialists in their canonical order
pub fn custom_subagents() -> Vec<SubAgentSpec> {
    vec![
        create_custom_subagent(
            "esg-analyst",
            "Evaluates Environmental, Social, and Governance factors",
            ESG_PROMPT,
        ),
        create_custom_subagent(
            "sector-analyst",
            "Provides sector-specific analysis and industry comparisons",
            SECTOR_PROMPT,
        ),
        create_custom_subagent(
            "macro-analyst",
            "Analyzes macroeconomic factors and their impact on investments",
            MACRO_PROMPT,
        ),
        create_custom_subagent(
            "quant-analyst",
            "Performs quantitative analysis using statistical models and algorithms",
            QUANT_PROMPT,
        ),
        create_custom_subagent(
            "options-analyst",
            "Specializes in options strategies and derivatives analysis",
            OPTIONS_PROMPT,
        ),
        create_custom_subagent(
            "credit-analyst",
            "Analyzes credit risk and fixed income securities",
            CREDIT_PROMPT,
        ),
    ]
}

/// Grouping of the built-in specialists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubAgentCategory {
    Sustainability,
    Industry,
    Economic,
    Quantitative,
    Derivatives,
    FixedIncome,
    All,
}

impl SubAgentCategory {
    /// Look up a category by name; unknown names select every specialist
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "sustainability" => SubAgentCategory::Sustainability,
            "industry" => SubAgentCategory::Industry,
            "economic" => SubAgentCategory::Economic,
            "quantitative" => SubAgentCategory::Quantitative,
            "derivatives" => SubAgentCategory::Derivatives,
            "fixed_income" => SubAgentCategory::FixedIncome,
            _ => SubAgentCategory::All,
        }
    }

    fn member(self) -> Option<&'static str> {
        match self {
            SubAgentCategory::Sustainability => Some("esg-analyst"),
            SubAgentCategory::Industry => Some("sector-analyst"),
            SubAgentCategory::Economic => Some("macro-analyst"),
            SubAgentCategory::Quantitative => Some("quant-analyst"),
            SubAgentCategory::Derivatives => Some("options-analyst"),
            SubAgentCategory::FixedIncome => Some("credit-analyst"),
            SubAgentCategory::All => None,
        }
    }
}

/// Built-in specialists in `category`
pub fn subagents_by_category(category: SubAgentCategory) -> Vec<SubAgentSpec> {
    let all = custom_subagents();
    match category.member() {
        Some(name) => all.into_iter().filter(|s| s.name == name).collect(),
        None => all,
    }
}

/// Delegation tool wrapping one specialist
pub struct SubAgentTool {
    tool_name: String,
    description: String,
    agent: SimpleAgent,
}

impl SubAgentTool {
    /// Expose `spec` as `ask_<name>`, answering with `profile` on `provider`
    pub fn new(spec: &SubAgentSpec, provider: Arc<dyn LLMProvider>, profile: &ModelProfile) -> Self {
        let config = SimpleConfig {
            model: profile.model.clone(),
            system_prompt: spec.prompt.clone(),
            temperature: profile.temperature,
            top_p: profile.top_p,
            ..SimpleConfig::default()
        };
        Self {
            tool_name: tool_name_for(&spec.name),
            description: format!(
                "Delegate a focused task to the {} specialist. {}",
                spec.name, spec.description
            ),
            agent: SimpleAgent::new(provider, config, spec.name.clone()),
        }
    }
}

/// `ask_esg_analyst` for `esg-analyst`
pub fn tool_name_for(subagent: &str) -> String {
    format!("ask_{}", subagent.replace('-', "_"))
}

#[async_trait]
impl Tool for SubAgentTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let task = required_str(&params, &self.tool_name, "task")?;
        info!(subagent = self.agent.name(), "Delegating task");

        match self.agent.process(task).await {
            Ok(response) => Ok(json!({
                "agent": self.agent.name(),
                "response": response,
            })),
            Err(e) => {
                warn!(subagent = self.agent.name(), error = %e, "Sub-agent failed");
                Ok(error_payload(e))
            }
        }
    }

    fn name(&self) -> &str {
        &self.tool_name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "task": {
                    "type": "string",
                    "description": "What the specialist should analyze, including the ticker"
                }
            },
            "required": ["task"]
        })
    }
}
