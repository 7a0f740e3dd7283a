//! Insider trading activity tool

use agent_core::Result as AgentResult;
use agent_tools::{Tool, error_payload, required_str};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::warn;

use super::{DataSources, normalize_symbol, symbol_property};
use crate::api::{InsiderTransaction, parse_number};
use crate::error::Result;

/// Transactions included in the summary
pub const RECENT_TRANSACTIONS: usize = 10;

/// Recent insider purchases and sales with the net direction
pub struct InsiderTradingTool {
    sources: DataSources,
}

impl InsiderTradingTool {
    pub fn new(sources: DataSources) -> Self {
        Self { sources }
    }

    async fn activity(&self, symbol: &str) -> Result<Value> {
        let client = self.sources.alpha_vantage()?;
        let transactions = client.insider_transactions(symbol).await?;

        let mut net_shares = 0.0;
        let recent: Vec<Value> = transactions
            .iter()
            .take(RECENT_TRANSACTIONS)
            .filter_map(|t| {
                let (side, sign) = direction(t)?;
                let shares = parse_number(t.shares.as_deref()).unwrap_or(0.0);
                net_shares += sign * shares;
                Some(json!({
                    "insider": insider_label(t),
                    "transaction": side,
                    "shares": shares.round() as i64,
                    "price": parse_number(t.share_price.as_deref()),
                    "date": t.transaction_date.clone().unwrap_or_default(),
                }))
            })
            .collect();

        let net = if net_shares > 0.0 {
            "POSITIVE"
        } else if net_shares < 0.0 {
            "NEGATIVE"
        } else {
            "NEUTRAL"
        };

        Ok(json!({
            "symbol": symbol,
            "recent_transactions": recent,
            "net_insider_activity": net,
        }))
    }
}

/// `BUY`/`SELL` with the share sign; other codes are skipped
fn direction(transaction: &InsiderTransaction) -> Option<(&'static str, f64)> {
    match transaction.acquisition_or_disposal.as_deref()?.trim() {
        "A" => Some(("BUY", 1.0)),
        "D" => Some(("SELL", -1.0)),
        _ => None,
    }
}

/// `"CEO Jane Doe"` from title and name
fn insider_label(transaction: &InsiderTransaction) -> String {
    [
        transaction.executive_title.as_deref(),
        transaction.executive.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join(" ")
}

#[async_trait]
impl Tool for InsiderTradingTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let symbol = normalize_symbol(&required_str(&params, self.name(), "symbol")?);
        Ok(self.activity(&symbol).await.unwrap_or_else(|e| {
            warn!(symbol = %symbol, error = %e, "Insider activity unavailable");
            error_payload(e)
        }))
    }

    fn name(&self) -> &'static str {
        "get_insider_trading"
    }

    fn description(&self) -> &'static str {
        "Get recent insider trading activity for a stock and whether insiders are net buyers or sellers."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": { "symbol": symbol_property() },
            "required": ["symbol"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::sources_with_server;
    use wiremock::matchers::query_param;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn server_with(data: Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(query_param("function", "INSIDER_TRANSACTIONS"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": data})))
            .mount(&server)
            .await;
        server
    }

    #[test]
    fn test_insider_label() {
        let t = InsiderTransaction {
            executive: Some("Jane Doe".to_string()),
            executive_title: Some("CEO".to_string()),
            ..InsiderTransaction::default()
        };
        assert_eq!(insider_label(&t), "CEO Jane Doe");
        assert_eq!(insider_label(&InsiderTransaction::default()), "");
    }

    #[tokio::test]
    async fn test_net_buying_is_positive() {
        let server = server_with(json!([
            {"transaction_date": "2024-01-10", "executive": "Jane Doe", "executive_title": "CEO",
             "acquisition_or_disposal": "A", "shares": "10000.0", "share_price": "138.5"},
            {"transaction_date": "2024-01-08", "executive": "John Roe", "executive_title": "CFO",
             "acquisition_or_disposal": "D", "shares": "2500.0", "share_price": "140.0"}
        ]))
        .await;

        let tool = InsiderTradingTool::new(sources_with_server(vec![], &server));
        let result = tool.execute(json!({"symbol": "ACME"})).await.unwrap();

        let recent = result["recent_transactions"].as_array().unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0]["insider"], "CEO Jane Doe");
        assert_eq!(recent[0]["transaction"], "BUY");
        assert_eq!(recent[0]["shares"], 10000);
        assert_eq!(recent[0]["price"], json!(138.5));
        assert_eq!(recent[1]["transaction"], "SELL");
        assert_eq!(result["net_insider_activity"], "POSITIVE");
    }

    #[tokio::test]
    async fn test_net_selling_is_negative() {
        let server = server_with(json!([
            {"executive": "A", "acquisition_or_disposal": "D", "shares": "500"},
            {"executive": "B", "acquisition_or_disposal": "A", "shares": "100"}
        ]))
        .await;

        let tool = InsiderTradingTool::new(sources_with_server(vec![], &server));
        let result = tool.execute(json!({"symbol": "ACME"})).await.unwrap();
        assert_eq!(result["net_insider_activity"], "NEGATIVE");
    }

    #[tokio::test]
    async fn test_no_transactions_is_neutral() {
        let server = server_with(json!([])).await;
        let tool = InsiderTradingTool::new(sources_with_server(vec![], &server));
        let result = tool.execute(json!({"symbol": "ACME"})).await.unwrap();
        assert_eq!(result["net_insider_activity"], "NEUTRAL");
        assert!(result["recent_transactions"].as_array().unwrap().is_empty());
    }
}
