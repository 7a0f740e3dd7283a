//! Tool for the latest annual income statement and balance sheet

use agent_core::Result as AgentResult;
use agent_tools::{Tool, error_payload, required_str};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde_json::{Value, json};
use tracing::warn;

use super::{DataSources, line_item, normalize_symbol, symbol_property};
use crate::error::{ResearchError, Result};

/// Revenue, net income, total assets and total debt of the latest fiscal year
pub struct FinancialStatementsTool {
    sources: DataSources,
}

impl FinancialStatementsTool {
    pub fn new(sources: DataSources) -> Self {
        Self { sources }
    }

    async fn latest_annual(&self, symbol: &str) -> Result<Value> {
        let client = self.sources.alpha_vantage()?;

        let income = client.income_statements(symbol).await?;
        let Some(income) = income.into_iter().next() else {
            return Err(ResearchError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "no annual income statements".to_string(),
            });
        };
        let balance = client
            .balance_sheets(symbol)
            .await?
            .into_iter()
            .next()
            .unwrap_or_default();

        let total_debt = balance
            .short_long_term_debt_total
            .as_deref()
            .filter(|v| *v != "None")
            .or(balance.long_term_debt.as_deref());

        Ok(json!({
            "symbol": symbol,
            "period": fiscal_year(income.fiscal_date_ending.as_deref()),
            "revenue": line_item(income.total_revenue.as_deref()),
            "net_income": line_item(income.net_income.as_deref()),
            "total_assets": line_item(balance.total_assets.as_deref()),
            "total_debt": line_item(total_debt),
        }))
    }
}

/// `"2023"` from `"2023-12-31"`
fn fiscal_year(fiscal_date_ending: Option<&str>) -> String {
    fiscal_date_ending
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .map_or_else(|| "N/A".to_string(), |d| d.year().to_string())
}

#[async_trait]
impl Tool for FinancialStatementsTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let symbol = normalize_symbol(&required_str(&params, self.name(), "symbol")?);
        Ok(self.latest_annual(&symbol).await.unwrap_or_else(|e| {
            warn!(symbol = %symbol, error = %e, "Financial statements unavailable");
            error_payload(e)
        }))
    }

    fn name(&self) -> &'static str {
        "get_financial_statements"
    }

    fn description(&self) -> &'static str {
        "Get key financial statement data from the latest annual report: revenue, \
         net income, total assets and total debt."
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
    use crate::tools::test_support::{empty_sources, sources_with_server};
    use wiremock::matchers::query_param;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_fiscal_year() {
        assert_eq!(fiscal_year(Some("2023-09-30")), "2023");
        assert_eq!(fiscal_year(Some("garbage")), "N/A");
        assert_eq!(fiscal_year(None), "N/A");
    }

    #[tokio::test]
    async fn test_without_key_is_error_payload() {
        let tool = FinancialStatementsTool::new(empty_sources());
        let result = tool.execute(json!({"symbol": "AAPL"})).await.unwrap();
        assert!(result["error"].as_str().unwrap().contains("ALPHA_VANTAGE_API_KEY"));
    }

    #[tokio::test]
    async fn test_latest_annual_report() {
        let server = MockServer::start().await;
        Mock::given(query_param("function", "INCOME_STATEMENT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "symbol": "AAPL",
                "annualReports": [
                    {"fiscalDateEnding": "2023-09-30", "totalRevenue": "383285000000", "netIncome": "96995000000"},
                    {"fiscalDateEnding": "2022-09-30", "totalRevenue": "394328000000", "netIncome": "99803000000"}
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(query_param("function", "BALANCE_SHEET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "symbol": "AAPL",
                "annualReports": [
                    {"fiscalDateEnding": "2023-09-30", "totalAssets": "352583000000",
                     "shortLongTermDebtTotal": "None", "longTermDebt": "95281000000"}
                ]
            })))
            .mount(&server)
            .await;

        let tool = FinancialStatementsTool::new(sources_with_server(vec![], &server));
        let result = tool.execute(json!({"symbol": "aapl"})).await.unwrap();

        assert_eq!(result["symbol"], "AAPL");
        assert_eq!(result["period"], "2023");
        assert_eq!(result["revenue"], json!(383_285_000_000.0));
        assert_eq!(result["net_income"], json!(96_995_000_000.0));
        assert_eq!(result["total_assets"], json!(352_583_000_000.0));
        assert_eq!(result["total_debt"], json!(95_281_000_000.0));
    }

    #[tokio::test]
    async fn test_no_annual_reports_is_error_payload() {
        let server = MockServer::start().await;
        Mock::given(query_param("function", "INCOME_STATEMENT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let tool = FinancialStatementsTool::new(sources_with_server(vec![], &server));
        let result = tool.execute(json!({"symbol": "XYZ"})).await.unwrap();
        assert_eq!(
            result["error"],
            "Data not available for XYZ: no annual income statements"
        );
    }

    #[tokio::test]
    async fn test_missing_line_items_are_na() {
        let server = MockServer::start().await;
        Mock::given(query_param("function", "INCOME_STATEMENT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "annualReports": [{"fiscalDateEnding": "2024-12-31", "totalRevenue": "1000"}]
            })))
            .mount(&server)
            .await;
        Mock::given(query_param("function", "BALANCE_SHEET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"annualReports": []})))
            .mount(&server)
            .await;

        let tool = FinancialStatementsTool::new(sources_with_server(vec![], &server));
        let result = tool.execute(json!({"symbol": "NEW"})).await.unwrap();
        assert_eq!(result["revenue"], json!(1000.0));
        assert_eq!(result["net_income"], "N/A");
        assert_eq!(result["total_assets"], "N/A");
        assert_eq!(result["total_debt"], "N/A");
    }
}
