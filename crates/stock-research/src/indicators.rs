//! Moving averages, RSI and trend classification over daily closes
//!
//! Every indicator is `None` when the series is shorter than its window.

use crate::api::Bar;
use serde::Serialize;
use ta::Next;
use ta::indicators::SimpleMovingAverage;

/// RSI lookback
pub const RSI_WINDOW: usize = 14;
/// Short moving-average window
pub const SHORT_WINDOW: usize = 20;
/// Long moving-average window
pub const LONG_WINDOW: usize = 50;

/// Round to two decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Mean of the last `window` values
pub fn sma(values: &[f64], window: usize) -> Option<f64> {
    if values.len() < window {
        return None;
    }
    let mut indicator = SimpleMovingAverage::new(window).ok()?;
    values[values.len() - window..]
        .iter()
        .map(|&v| indicator.next(v))
        .last()
}

/// RSI from a simple rolling mean of gains and losses
///
/// The change series opens with a zero change for the first close, so the
/// value exists as soon as there are `window` closes.
pub fn rsi(closes: &[f64], window: usize) -> Option<f64> {
    if window == 0 || closes.len() < window {
        return None;
    }

    let changes: Vec<f64> = std::iter::once(0.0)
        .chain(closes.windows(2).map(|pair| pair[1] - pair[0]))
        .collect();
    let gains: Vec<f64> = changes.iter().map(|c| c.max(0.0)).collect();
    let losses: Vec<f64> = changes.iter().map(|c| (-c).max(0.0)).collect();

    let avg_gain = sma(&gains, window)?;
    let avg_loss = sma(&losses, window)?;

    if avg_loss == 0.0 {
        return (avg_gain > 0.0).then_some(100.0);
    }
    let rs = avg_gain / avg_loss;
    Some(100.0 - 100.0 / (1.0 + rs))
}

/// Direction implied by price and the two moving averages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendSignal {
    Bullish,
    Bearish,
}

impl TrendSignal {
    /// Bullish exactly when `price > short > long`
    pub fn classify(price: f64, short: Option<f64>, long: Option<f64>) -> Self {
        match (short, long) {
            (Some(short), Some(long)) if price > short && short > long => TrendSignal::Bullish,
            _ => TrendSignal::Bearish,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrendSignal::Bullish => "bullish",
            TrendSignal::Bearish => "bearish",
        }
    }
}

/// Indicator summary of the latest bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub current_price: f64,
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub rsi: Option<f64>,
    pub volume: u64,
    pub trend_signal: TrendSignal,
}

impl IndicatorSnapshot {
    /// Summarize `bars`; `None` for an empty series
    pub fn from_bars(bars: &[Bar]) -> Option<Self> {
        let last = bars.last()?;
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

        let sma_20 = sma(&closes, SHORT_WINDOW);
        let sma_50 = sma(&closes, LONG_WINDOW);

        Some(Self {
            current_price: round2(last.close),
            sma_20: sma_20.map(round2),
            sma_50: sma_50.map(round2),
            rsi: rsi(&closes, RSI_WINDOW).map(round2),
            volume: last.volume,
            trend_signal: TrendSignal::classify(last.close, sma_20, sma_50),
        })
    }
}
