//! Backtest summary types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Backtest summary for one symbol, as served by `/api/backtests/{symbol}`.
///
/// Until the backtesting engine ships the backend returns placeholder stats,
/// so every numeric field may legitimately be zero; `notes` carries the
/// caveat text when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestSummary {
    pub symbol: String,
    /// Historical window evaluated, e.g. `"1y"`.
    pub range: String,
    pub trades: u64,
    pub win_rate: f64,
    pub avg_return: f64,
    pub total_return: f64,
    pub last_trained_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}
