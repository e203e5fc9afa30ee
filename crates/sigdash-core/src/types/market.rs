//! OHLCV candle and indicator types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV data point as served by `/api/market-data/{symbol}/ohlcv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// One indicator row as served by `/api/market-data/{symbol}/indicators`.
///
/// Every value is optional: early rows lack enough history for the longer
/// lookback windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub rsi: Option<f64>,
    pub ema_12: Option<f64>,
    pub ema_26: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
}
