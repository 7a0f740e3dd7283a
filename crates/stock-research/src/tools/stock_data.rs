//! Tool for the current price snapshot of a stock

use agent_core::Result as AgentResult;
use agent_tools::{Tool, error_payload, required_str};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{info, warn};

use super::{DataSources, normalize_symbol, symbol_property};
use crate::api::{CompanyOverview, HistoryRange, parse_number};
use crate::indicators::round2;

/// Latest close, 52-week range and headline valuation figures
pub struct StockPriceTool {
    sources: DataSources,
}

impl StockPriceTool {
    pub fn new(sources: DataSources) -> Self {
        Self { sources }
    }

    async fn snapshot(&self, symbol: &str) -> Value {
        let bars = match self.sources.prices.daily_bars(symbol, HistoryRange::OneYear).await {
            Ok(bars) => bars,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Price history request failed");
                Vec::new()
            }
        };
        let Some(last) = bars.last() else {
            return error_payload(format!("Could not retrieve data for {symbol}"));
        };

        let high = bars.iter().map(|b| b.high).fold(f64::MIN, f64::max);
        let low = bars.iter().map(|b| b.low).fold(f64::MAX, f64::min);
        let overview = self.overview(symbol).await;

        let company_name = overview.name.filter(|n| !n.is_empty()).unwrap_or_else(|| symbol.to_string());
        let market_cap = parse_number(overview.market_cap.as_deref()).unwrap_or(0.0);
        let pe_ratio = parse_number(overview.pe_ratio.as_deref()).map_or_else(|| json!("N/A"), |pe| json!(pe));

        info!(symbol = %symbol, price = last.close, "Price snapshot ready");
        json!({
            "symbol": symbol,
            "current_price": round2(last.close),
            "company_name": company_name,
            "market_cap": market_cap,
            "pe_ratio": pe_ratio,
            "52_week_high": round2(high),
            "52_week_low": round2(low),
        })
    }

    /// Company overview, or an empty one when unavailable
    async fn overview(&self, symbol: &str) -> CompanyOverview {
        let Some(client) = &self.sources.alpha_vantage else {
            return CompanyOverview::default();
        };
        client.company_overview(symbol).await.unwrap_or_else(|e| {
            warn!(symbol = %symbol, error = %e, "Company overview unavailable");
            CompanyOverview::default()
        })
    }
}

#[async_trait]
impl Tool for StockPriceTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let symbol = normalize_symbol(&required_str(&params, self.name(), "symbol")?);
        Ok(self.snapshot(&symbol).await)
    }

    fn name(&self) -> &'static str {
        "get_stock_price"
    }

    fn description(&self) -> &'static str {
        "Get current stock price and basic info. Returns the latest close, company name, \
         market cap, P/E ratio and the 52-week high and low."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": { "symbol": symbol_property() },
            "required": ["symbol"]
        })
    }
}
