//! Alpha Vantage API client
//!
//! Fundamentals, news sentiment, insider transactions and option chains. All
//! endpoints share one `query` path that waits on the rate limiter and maps the
//! service's in-band error objects to [`ResearchError`].

use crate::error::{ResearchError, Result};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Production endpoint
pub const BASE_URL: &str = "https://www.alphavantage.co/query";
/// Free tier allowance
pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 5;

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Alpha Vantage API client
///
/// Clones share one rate limiter.
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    base_url: String,
    rate_limiter: SharedRateLimiter,
}

/// Company overview (`OVERVIEW`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompanyOverview {
    pub symbol: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "MarketCapitalization")]
    pub market_cap: Option<String>,
    #[serde(rename = "PERatio")]
    pub pe_ratio: Option<String>,
    pub shares_outstanding: Option<String>,
}

/// Envelope of the statement endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statements<T> {
    #[serde(default = "Vec::new")]
    pub annual_reports: Vec<T>,
}

/// One annual income statement
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeReport {
    pub fiscal_date_ending: Option<String>,
    pub total_revenue: Option<String>,
    pub net_income: Option<String>,
}

/// One annual balance sheet
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceReport {
    pub fiscal_date_ending: Option<String>,
    pub total_assets: Option<String>,
    pub short_long_term_debt_total: Option<String>,
    pub long_term_debt: Option<String>,
}

/// One annual cash flow statement
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowReport {
    pub fiscal_date_ending: Option<String>,
    pub operating_cashflow: Option<String>,
    pub capital_expenditures: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsFeed {
    #[serde(default)]
    feed: Vec<NewsArticle>,
}

/// Article from `NEWS_SENTIMENT`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsArticle {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    /// `YYYYMMDDTHHMMSS`
    #[serde(default)]
    pub time_published: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub source: String,
    pub overall_sentiment_label: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

/// Row from `INSIDER_TRANSACTIONS`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsiderTransaction {
    pub transaction_date: Option<String>,
    pub executive: Option<String>,
    pub executive_title: Option<String>,
    /// `A` for acquisition, `D` for disposal
    pub acquisition_or_disposal: Option<String>,
    pub shares: Option<String>,
    pub share_price: Option<String>,
}

/// Contract from `HISTORICAL_OPTIONS`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionContract {
    pub expiration: Option<String>,
    pub strike: Option<String>,
    /// `call` or `put`
    #[serde(rename = "type")]
    pub contract_type: Option<String>,
    pub volume: Option<String>,
}

impl AlphaVantageClient {
    /// Create a client for the production endpoint at the free-tier rate
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_rate_limit(api_key, DEFAULT_REQUESTS_PER_MINUTE)
    }

    /// Create a client allowing `rate_limit` requests per minute
    pub fn with_rate_limit(api_key: impl Into<String>, rate_limit: u32) -> Self {
        let quota = Quota::per_minute(NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::MIN));
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    /// Point the client at another endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Company overview; an unknown symbol yields an empty overview
    pub async fn company_overview(&self, symbol: &str) -> Result<CompanyOverview> {
        self.query("OVERVIEW", &[("symbol", symbol)]).await
    }

    /// Annual income statements, latest first
    pub async fn income_statements(&self, symbol: &str) -> Result<Vec<IncomeReport>> {
        let statements: Statements<IncomeReport> =
            self.query("INCOME_STATEMENT", &[("symbol", symbol)]).await?;
        Ok(statements.annual_reports)
    }

    /// Annual balance sheets, latest first
    pub async fn balance_sheets(&self, symbol: &str) -> Result<Vec<BalanceReport>> {
        let statements: Statements<BalanceReport> =
            self.query("BALANCE_SHEET", &[("symbol", symbol)]).await?;
        Ok(statements.annual_reports)
    }

    /// Annual cash flow statements, latest first
    pub async fn cash_flows(&self, symbol: &str) -> Result<Vec<CashFlowReport>> {
        let statements: Statements<CashFlowReport> =
            self.query("CASH_FLOW", &[("symbol", symbol)]).await?;
        Ok(statements.annual_reports)
    }

    /// Recent articles mentioning `symbol`
    pub async fn news(&self, symbol: &str, limit: usize) -> Result<Vec<NewsArticle>> {
        let limit = limit.to_string();
        let feed: NewsFeed = self
            .query("NEWS_SENTIMENT", &[("tickers", symbol), ("limit", &limit)])
            .await?;
        Ok(feed.feed)
    }

    /// Insider transactions, latest first
    pub async fn insider_transactions(&self, symbol: &str) -> Result<Vec<InsiderTransaction>> {
        let envelope: DataEnvelope<InsiderTransaction> = self
            .query("INSIDER_TRANSACTIONS", &[("symbol", symbol)])
            .await?;
        Ok(envelope.data)
    }

    /// Option chain of the latest trading session
    pub async fn option_chain(&self, symbol: &str) -> Result<Vec<OptionContract>> {
        let envelope: DataEnvelope<OptionContract> = self
            .query("HISTORICAL_OPTIONS", &[("symbol", symbol)])
            .await?;
        Ok(envelope.data)
    }

    async fn query<T: DeserializeOwned>(&self, function: &str, params: &[(&str, &str)]) -> Result<T> {
        // Wait for rate limiter
        self.rate_limiter.until_ready().await;

        let mut query: Vec<(&str, &str)> = vec![("function", function)];
        query.extend_from_slice(params);
        query.push(("apikey", &self.api_key));

        debug!(function = %function, "Alpha Vantage request");
        let response = self.client.get(&self.base_url).query(&query).send().await?;

        if !response.status().is_success() {
            return Err(ResearchError::AlphaVantage(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let data: serde_json::Value = response.json().await?;

        // Check for API error messages
        if let Some(error) = data.get("Error Message").and_then(|v| v.as_str()) {
            return Err(ResearchError::AlphaVantage(error.to_string()));
        }
        if data.get("Note").is_some() || data.get("Information").is_some() {
            return Err(ResearchError::RateLimitExceeded {
                provider: "Alpha Vantage".to_string(),
            });
        }

        Ok(serde_json::from_value(data)?)
    }
}

/// Parse an Alpha Vantage numeric string; `"None"`, `"-"` and blanks are absent
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() || raw == "None" || raw == "-" {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
