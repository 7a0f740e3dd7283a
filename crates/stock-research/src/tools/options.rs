//! Options flow tool: call/put volume and the largest trades

use agent_core::Result as AgentResult;
use agent_tools::{Tool, error_payload, required_str};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::warn;

use super::{DataSources, normalize_symbol, symbol_property};
use crate::api::{OptionContract, parse_number};
use crate::error::{ResearchError, Result};

/// Contracts listed as large trades
pub const LARGE_TRADES: usize = 3;
/// Call/put ratio above which flow reads bullish
pub const BULLISH_RATIO: f64 = 1.2;
/// Call/put ratio below which flow reads bearish
pub const BEARISH_RATIO: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Call,
    Put,
}

impl Side {
    fn of(contract: &OptionContract) -> Option<Self> {
        match contract.contract_type.as_deref()?.trim().to_ascii_lowercase().as_str() {
            "call" => Some(Side::Call),
            "put" => Some(Side::Put),
            _ => None,
        }
    }
}

/// Summary of the latest option chain's traded volume
pub struct OptionsFlowTool {
    sources: DataSources,
}

impl OptionsFlowTool {
    pub fn new(sources: DataSources) -> Self {
        Self { sources }
    }

    async fn flow(&self, symbol: &str) -> Result<Value> {
        let client = self.sources.alpha_vantage()?;
        let chain = client.option_chain(symbol).await?;
        if chain.is_empty() {
            return Err(ResearchError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "no option contracts".to_string(),
            });
        }

        let mut traded: Vec<(Side, u64, &OptionContract)> = chain
            .iter()
            .filter_map(|c| {
                let volume = parse_number(c.volume.as_deref()).unwrap_or(0.0).max(0.0) as u64;
                Some((Side::of(c)?, volume, c))
            })
            .collect();

        let call_volume: u64 = traded.iter().filter(|t| t.0 == Side::Call).map(|t| t.1).sum();
        let put_volume: u64 = traded.iter().filter(|t| t.0 == Side::Put).map(|t| t.1).sum();
        let ratio = (put_volume > 0).then(|| call_volume as f64 / put_volume as f64);

        traded.sort_by(|a, b| b.1.cmp(&a.1));
        let large_trades: Vec<Value> = traded
            .iter()
            .filter(|t| t.1 > 0)
            .take(LARGE_TRADES)
            .map(|(side, volume, contract)| {
                let (kind, sentiment) = match side {
                    Side::Call => ("CALL", "BULLISH"),
                    Side::Put => ("PUT", "BEARISH"),
                };
                json!({
                    "type": kind,
                    "strike": parse_number(contract.strike.as_deref()),
                    "expiry": contract.expiration.clone().unwrap_or_default(),
                    "volume": volume,
                    "sentiment": sentiment,
                })
            })
            .collect();

        Ok(json!({
            "symbol": symbol,
            "unusual_activity": {
                "call_volume": call_volume,
                "put_volume": put_volume,
                "call_put_ratio": ratio.map(|r| (r * 1000.0).round() / 1000.0),
                "large_trades": large_trades,
            },
            "sentiment": flow_sentiment(call_volume, ratio),
        }))
    }
}

/// `ratio` is `None` when no puts traded
fn flow_sentiment(call_volume: u64, ratio: Option<f64>) -> &'static str {
    match ratio {
        Some(r) if r > BULLISH_RATIO => "BULLISH",
        Some(r) if r < BEARISH_RATIO => "BEARISH",
        Some(_) => "NEUTRAL",
        None if call_volume > 0 => "BULLISH",
        None => "NEUTRAL",
    }
}

#[async_trait]
impl Tool for OptionsFlowTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let symbol = normalize_symbol(&required_str(&params, self.name(), "symbol")?);
        Ok(self.flow(&symbol).await.unwrap_or_else(|e| {
            warn!(symbol = %symbol, error = %e, "Options flow unavailable");
            error_payload(e)
        }))
    }

    fn name(&self) -> &'static str {
        "analyze_options_flow"
    }

    fn description(&self) -> &'static str {
        "Analyze options flow and unusual activity: call and put volume, the call/put \
         ratio and the largest trades of the latest session."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": { "symbol": symbol_property() },
            "required": ["symbol"]
        })
    }
}
