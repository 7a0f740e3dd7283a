//! Discounted cash flow valuation tool

use agent_core::Result as AgentResult;
use agent_tools::{Tool, error_payload, optional_number, required_str};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{info, warn};

use super::{DataSources, normalize_symbol, symbol_property};
use crate::api::{HistoryRange, parse_number};
use crate::error::{ResearchError, Result};
use crate::indicators::round2;

/// Growth assumed when the caller gives none
pub const DEFAULT_GROWTH_RATE: f64 = 0.05;
/// Required rate of return
pub const DISCOUNT_RATE: f64 = 0.10;
/// Perpetual growth after the projection
pub const TERMINAL_GROWTH: f64 = 0.025;
/// Explicitly projected years
pub const PROJECTION_YEARS: i32 = 5;

/// Per-share DCF value of a starting free cash flow
///
/// Cash flow grows at `growth_rate` for [`PROJECTION_YEARS`], then at
/// [`TERMINAL_GROWTH`] forever, all discounted at [`DISCOUNT_RATE`].
pub fn dcf_per_share(free_cash_flow: f64, growth_rate: f64, shares: f64) -> f64 {
    let mut cash_flow = free_cash_flow;
    let mut present_value = 0.0;
    for year in 1..=PROJECTION_YEARS {
        cash_flow *= 1.0 + growth_rate;
        present_value += cash_flow / (1.0 + DISCOUNT_RATE).powi(year);
    }

    let terminal_value = cash_flow * (1.0 + TERMINAL_GROWTH) / (DISCOUNT_RATE - TERMINAL_GROWTH);
    present_value += terminal_value / (1.0 + DISCOUNT_RATE).powi(PROJECTION_YEARS);

    present_value / shares
}

/// Intrinsic value per share against the market price
pub struct IntrinsicValueTool {
    sources: DataSources,
}

impl IntrinsicValueTool {
    pub fn new(sources: DataSources) -> Self {
        Self { sources }
    }

    async fn valuation(&self, symbol: &str, growth_rate: f64) -> Result<Value> {
        let unavailable = |reason: &str| ResearchError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: reason.to_string(),
        };
        let client = self.sources.alpha_vantage()?;

        let cash_flow = client
            .cash_flows(symbol)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| unavailable("no annual cash flow statements"))?;
        let operating = parse_number(cash_flow.operating_cashflow.as_deref())
            .ok_or_else(|| unavailable("operating cash flow not reported"))?;
        let capex = parse_number(cash_flow.capital_expenditures.as_deref()).unwrap_or(0.0);
        // Reported as a positive outflow
        let free_cash_flow = operating - capex.abs();

        let overview = client.company_overview(symbol).await?;
        let shares = parse_number(overview.shares_outstanding.as_deref())
            .filter(|s| *s > 0.0)
            .ok_or_else(|| unavailable("shares outstanding not reported"))?;

        let bars = self.sources.prices.daily_bars(symbol, HistoryRange::FiveDays).await?;
        let current_price = bars
            .last()
            .map(|b| b.close)
            .filter(|p| *p > 0.0)
            .ok_or_else(|| unavailable("no recent price"))?;

        let intrinsic_value = dcf_per_share(free_cash_flow, growth_rate, shares);
        let upside = (intrinsic_value - current_price) / current_price * 100.0;
        info!(symbol = %symbol, intrinsic_value, current_price, "DCF valuation computed");

        Ok(json!({
            "symbol": symbol,
            "method": "DCF",
            "growth_rate": growth_rate,
            "intrinsic_value": round2(intrinsic_value),
            "current_price": round2(current_price),
            "upside_potential": format!("{upside:.1}%"),
            "recommendation": if intrinsic_value > current_price { "BUY" } else { "SELL" },
        }))
    }
}

#[async_trait]
impl Tool for IntrinsicValueTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let symbol = normalize_symbol(&required_str(&params, self.name(), "symbol")?);
        let growth_rate = match optional_number(&params, "growth_rate") {
            Ok(rate) => rate.unwrap_or(DEFAULT_GROWTH_RATE),
            Err(reason) => return Ok(error_payload(ResearchError::InvalidArgument(reason))),
        };
        if growth_rate <= -1.0 || growth_rate > 1.0 {
            return Ok(error_payload(ResearchError::InvalidArgument(format!(
                "growth_rate must be a fraction in (-1, 1], got {growth_rate}"
            ))));
        }

        Ok(self.valuation(&symbol, growth_rate).await.unwrap_or_else(|e| {
            warn!(symbol = %symbol, error = %e, "Intrinsic value unavailable");
            error_payload(e)
        }))
    }

    fn name(&self) -> &'static str {
        "calculate_intrinsic_value"
    }

    fn description(&self) -> &'static str {
        "Calculate intrinsic value per share with a five-year discounted cash flow model \
         and compare it with the current price."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "symbol": symbol_property(),
                "growth_rate": {
                    "type": "number",
                    "description": "Annual free cash flow growth over the projection, e.g. 0.05",
                    "default": DEFAULT_GROWTH_RATE
                }
            },
            "required": ["symbol"]
        })
    }
}
