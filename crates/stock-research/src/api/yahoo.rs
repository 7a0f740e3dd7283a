//! Yahoo Finance chart-data client
//!
//! Daily OHLCV bars are the only thing the research tools need from Yahoo.
//! [`PriceHistory`] is the seam the tools depend on so tests can substitute
//! scripted series.

use crate::error::{ResearchError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use yahoo_finance_api as yahoo;

/// History windows accepted by the chart endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryRange {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    TwoYears,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "10y")]
    TenYears,
    #[serde(rename = "ytd")]
    YearToDate,
    #[serde(rename = "max")]
    Max,
}

impl HistoryRange {
    /// Every range in ascending order
    pub const ALL: [HistoryRange; 11] = [
        HistoryRange::OneDay,
        HistoryRange::FiveDays,
        HistoryRange::OneMonth,
        HistoryRange::ThreeMonths,
        HistoryRange::SixMonths,
        HistoryRange::OneYear,
        HistoryRange::TwoYears,
        HistoryRange::FiveYears,
        HistoryRange::TenYears,
        HistoryRange::YearToDate,
        HistoryRange::Max,
    ];

    /// The value Yahoo expects in the `range` query parameter
    pub fn as_str(self) -> &'static str {
        match self {
            HistoryRange::OneDay => "1d",
            HistoryRange::FiveDays => "5d",
            HistoryRange::OneMonth => "1mo",
            HistoryRange::ThreeMonths => "3mo",
            HistoryRange::SixMonths => "6mo",
            HistoryRange::OneYear => "1y",
            HistoryRange::TwoYears => "2y",
            HistoryRange::FiveYears => "5y",
            HistoryRange::TenYears => "10y",
            HistoryRange::YearToDate => "ytd",
            HistoryRange::Max => "max",
        }
    }
}

impl fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HistoryRange {
    type Err = ResearchError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        HistoryRange::ALL
            .into_iter()
            .find(|r| r.as_str() == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = HistoryRange::ALL.iter().map(|r| r.as_str()).collect();
                ResearchError::InvalidArgument(format!(
                    "invalid period '{s}', expected one of: {}",
                    valid.join(", ")
                ))
            })
    }
}

/// One daily OHLCV bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Source of daily price history
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceHistory: Send + Sync {
    /// Daily bars for `symbol` over `range`, oldest first
    ///
    /// An unknown symbol may surface either as an error or as an empty series.
    async fn daily_bars(&self, symbol: &str, range: HistoryRange) -> Result<Vec<Bar>>;
}

/// Yahoo Finance API client
#[derive(Debug, Clone, Default)]
pub struct YahooFinanceClient;

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PriceHistory for YahooFinanceClient {
    async fn daily_bars(&self, symbol: &str, range: HistoryRange) -> Result<Vec<Bar>> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| ResearchError::YahooFinance(e.to_string()))?;

        let response = provider
            .get_quote_range(symbol, "1d", range.as_str())
            .await
            .map_err(|e| ResearchError::YahooFinance(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| ResearchError::YahooFinance(e.to_string()))?;
        debug!(symbol = %symbol, range = %range, bars = quotes.len(), "Fetched Yahoo history");

        Ok(quotes
            .iter()
            .map(|q| Bar {
                timestamp: DateTime::from_timestamp(q.timestamp as i64, 0)
                    .unwrap_or_else(Utc::now),
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
                volume: q.volume,
            })
            .collect())
    }
}
