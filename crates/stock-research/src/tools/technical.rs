//! Tool for moving averages, RSI and trend signal

use agent_core::Result as AgentResult;
use agent_tools::{Tool, error_payload, optional_str, required_str};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::{DataSources, normalize_symbol, symbol_property};
use crate::api::HistoryRange;
use crate::indicators::IndicatorSnapshot;

/// Range used when the caller gives none
pub const DEFAULT_PERIOD: HistoryRange = HistoryRange::ThreeMonths;

/// Technical indicator summary over a history window
pub struct TechnicalIndicatorTool {
    sources: DataSources,
}

impl TechnicalIndicatorTool {
    pub fn new(sources: DataSources) -> Self {
        Self { sources }
    }

    async fn summarize(&self, symbol: &str, period: HistoryRange) -> Value {
        let bars = match self.sources.prices.daily_bars(symbol, period).await {
            Ok(bars) => bars,
            Err(e) => {
                warn!(symbol = %symbol, period = %period, error = %e, "Price history request failed");
                Vec::new()
            }
        };
        let Some(snapshot) = IndicatorSnapshot::from_bars(&bars) else {
            return error_payload(format!("No historical data for {symbol}"));
        };
        debug!(symbol = %symbol, bars = bars.len(), trend = snapshot.trend_signal.as_str(), "Indicators computed");

        json!({
            "symbol": symbol,
            "current_price": snapshot.current_price,
            "sma_20": snapshot.sma_20,
            "sma_50": snapshot.sma_50,
            "rsi": snapshot.rsi,
            "volume": snapshot.volume,
            "trend_signal": snapshot.trend_signal,
        })
    }
}

#[async_trait]
impl Tool for TechnicalIndicatorTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let symbol = normalize_symbol(&required_str(&params, self.name(), "symbol")?);
        let period = match optional_str(&params, "period").map(|p| p.parse::<HistoryRange>()) {
            None => DEFAULT_PERIOD,
            Some(Ok(period)) => period,
            Some(Err(e)) => return Ok(error_payload(e)),
        };
        Ok(self.summarize(&symbol, period).await)
    }

    fn name(&self) -> &'static str {
        "get_technical_indicators"
    }

    fn description(&self) -> &'static str {
        "Calculate basic technical indicators: 20- and 50-day simple moving averages, \
         14-day RSI, latest volume and a bullish/bearish trend signal."
    }

    fn input_schema(&self) -> Value {
        let periods: Vec<&str> = HistoryRange::ALL.iter().map(|r| r.as_str()).collect();
        json!({
            "type": "object",
            "properties": {
                "symbol": symbol_property(),
                "period": {
                    "type": "string",
                    "description": "History window to analyze",
                    "enum": periods,
                    "default": DEFAULT_PERIOD.as_str()
                }
            },
            "required": ["symbol"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::yahoo::MockPriceHistory;
    use crate::indicators::tests::bars_from_closes;
    use crate::tools::test_support::{empty_sources, sources_with_closes};
    use mockall::predicate::{always, eq};
    use std::sync::Arc;

    #[test]
    fn test_schema_lists_periods() {
        let schema = TechnicalIndicatorTool::new(empty_sources()).input_schema();
        assert_eq!(schema["properties"]["period"]["default"], "3mo");
        assert_eq!(schema["properties"]["period"]["enum"].as_array().unwrap().len(), 11);
    }

    #[tokio::test]
    async fn test_empty_history_is_error_payload() {
        let tool = TechnicalIndicatorTool::new(empty_sources());
        let result = tool.execute(json!({"symbol": "NONE"})).await.unwrap();
        assert_eq!(result, json!({"error": "No historical data for NONE"}));
    }

    #[tokio::test]
    async fn test_rising_series_is_bullish() {
        let closes: Vec<f64> = (0..60).map(|i| 50.0 + f64::from(i)).collect();
        let tool = TechnicalIndicatorTool::new(sources_with_closes(closes));

        let result = tool.execute(json!({"symbol": "UP"})).await.unwrap();
        assert_eq!(result["trend_signal"], "bullish");
        assert!(result["sma_20"].is_number());
        assert!(result["sma_50"].is_number());
        assert!(result["rsi"].is_number());
        assert_eq!(result["volume"], json!(1_000_059));
    }

    #[tokio::test]
    async fn test_falling_series_is_bearish() {
        let closes: Vec<f64> = (0..60).map(|i| 200.0 - f64::from(i)).collect();
        let tool = TechnicalIndicatorTool::new(sources_with_closes(closes));

        let result = tool.execute(json!({"symbol": "DOWN"})).await.unwrap();
        assert_eq!(result["trend_signal"], "bearish");
    }

    #[tokio::test]
    async fn test_short_history_has_null_fields() {
        let closes: Vec<f64> = (0..10).map(|i| 10.0 + f64::from(i)).collect();
        let tool = TechnicalIndicatorTool::new(sources_with_closes(closes));

        let result = tool.execute(json!({"symbol": "IPO"})).await.unwrap();
        assert!(result["sma_20"].is_null());
        assert!(result["sma_50"].is_null());
        assert!(result["rsi"].is_null());
        assert_eq!(result["trend_signal"], "bearish");
    }

    #[tokio::test]
    async fn test_period_is_forwarded() {
        let mut prices = MockPriceHistory::new();
        prices
            .expect_daily_bars()
            .with(always(), eq(HistoryRange::OneYear))
            .times(1)
            .returning(|_, _| Ok(bars_from_closes(&[1.0, 2.0, 3.0])));
        let tool = TechnicalIndicatorTool::new(DataSources::new(Arc::new(prices), None));

        let result = tool
            .execute(json!({"symbol": "MSFT", "period": "1y"}))
            .await
            .unwrap();
        assert_eq!(result["current_price"], json!(3.0));
    }

    #[tokio::test]
    async fn test_unknown_period_is_error_payload() {
        let tool = TechnicalIndicatorTool::new(empty_sources());
        let result = tool
            .execute(json!({"symbol": "MSFT", "period": "2mo"}))
            .await
            .unwrap();
        assert!(result["error"].as_str().unwrap().contains("invalid period '2mo'"));
    }
}
