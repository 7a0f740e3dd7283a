//! Data tools exposed to the research agents
//!
//! Every tool answers with a JSON object. Expected failures (no data, missing
//! API key, upstream errors) come back as `{"error": "..."}` so the model can
//! read them as observations.

pub mod financials;
pub mod insider;
pub mod news;
pub mod options;
pub mod stock_data;
pub mod technical;
pub mod valuation;

pub use financials::FinancialStatementsTool;
pub use insider::InsiderTradingTool;
pub use news::CompanyNewsTool;
pub use options::OptionsFlowTool;
pub use stock_data::StockPriceTool;
pub use technical::TechnicalIndicatorTool;
pub use valuation::IntrinsicValueTool;

use crate::api::{AlphaVantageClient, PriceHistory, YahooFinanceClient, parse_number};
use crate::config::ResearchConfig;
use crate::error::{ResearchError, Result};
use agent_tools::Tool;
use serde_json::{Value, json};
use std::sync::Arc;

/// Upstream clients shared by all tools of one agent
#[derive(Clone)]
pub struct DataSources {
    pub prices: Arc<dyn PriceHistory>,
    pub alpha_vantage: Option<AlphaVantageClient>,
}

impl DataSources {
    pub fn new(prices: Arc<dyn PriceHistory>, alpha_vantage: Option<AlphaVantageClient>) -> Self {
        Self {
            prices,
            alpha_vantage,
        }
    }

    /// Yahoo Finance plus Alpha Vantage when a key is configured
    pub fn from_config(config: &ResearchConfig) -> Self {
        Self::new(
            Arc::new(YahooFinanceClient::new()),
            config.alpha_vantage_key.clone().map(AlphaVantageClient::new),
        )
    }

    pub(crate) fn alpha_vantage(&self) -> Result<&AlphaVantageClient> {
        self.alpha_vantage
            .as_ref()
            .ok_or(ResearchError::MissingApiKey("ALPHA_VANTAGE_API_KEY"))
    }
}

/// The three tools every research agent carries, in advertised order
pub fn base_tools(sources: &DataSources) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(StockPriceTool::new(sources.clone())),
        Arc::new(FinancialStatementsTool::new(sources.clone())),
        Arc::new(TechnicalIndicatorTool::new(sources.clone())),
    ]
}

/// Grouping of the optional analysis tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolCategory {
    Fundamental,
    Sentiment,
    Technical,
    All,
}

impl ToolCategory {
    /// Look up a category by name; unknown names select every tool
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "fundamental" => ToolCategory::Fundamental,
            "sentiment" => ToolCategory::Sentiment,
            "technical" => ToolCategory::Technical,
            _ => ToolCategory::All,
        }
    }
}

/// Optional analysis tools in `category`
pub fn custom_tools(sources: &DataSources, category: ToolCategory) -> Vec<Arc<dyn Tool>> {
    let news: Arc<dyn Tool> = Arc::new(CompanyNewsTool::new(sources.clone()));
    let valuation: Arc<dyn Tool> = Arc::new(IntrinsicValueTool::new(sources.clone()));
    let insider: Arc<dyn Tool> = Arc::new(InsiderTradingTool::new(sources.clone()));
    let options: Arc<dyn Tool> = Arc::new(OptionsFlowTool::new(sources.clone()));

    match category {
        ToolCategory::Fundamental => vec![valuation],
        ToolCategory::Sentiment => vec![news, insider],
        ToolCategory::Technical => vec![options],
        ToolCategory::All => vec![news, valuation, insider, options],
    }
}

/// Tickers are matched case-insensitively upstream; reports use upper case
pub(crate) fn normalize_symbol(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// A statement line item: the number when present, `"N/A"` otherwise
pub(crate) fn line_item(raw: Option<&str>) -> Value {
    parse_number(raw).map_or_else(|| json!("N/A"), |v| json!(v))
}

/// Shared input schema for tools that only take a ticker
pub(crate) fn symbol_property() -> Value {
    json!({
        "type": "string",
        "description": "Stock ticker symbol (e.g., 'AAPL', 'MSFT')"
    })
}
