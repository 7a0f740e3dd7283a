//! Clients for the market-data providers

pub mod alpha_vantage;
pub mod yahoo;

pub use alpha_vantage::{
    AlphaVantageClient, BalanceReport, CashFlowReport, CompanyOverview, IncomeReport,
    InsiderTransaction, NewsArticle, OptionContract, parse_number,
};
pub use yahoo::{Bar, HistoryRange, PriceHistory, YahooFinanceClient};
