//! Trading-signal types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Signal direction
// ---------------------------------------------------------------------------

/// Signal direction as emitted by the backend strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalType {
    Buy,
    Sell,
    Hold,
}

impl SignalType {
    /// Wire representation (also the query-parameter value).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Hold => "HOLD",
        }
    }
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Signal payloads
// ---------------------------------------------------------------------------

/// A single generated signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub id: Uuid,
    /// Asset symbol, e.g. `"BTC-USD"` or `"TSLA"`.
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub signal_type: SignalType,
    /// Confidence score, 0–100.
    pub strength: f64,
    /// Human-readable reasons produced by the strategy.
    pub reasoning: Vec<String>,
    pub price_at_signal: Option<f64>,
}

/// Paginated signal listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalList {
    pub signals: Vec<Signal>,
    /// Total matching rows, independent of pagination.
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_type_wire_format() {
        assert_eq!(serde_json::to_string(&SignalType::Buy).unwrap(), "\"BUY\"");
        let parsed: SignalType = serde_json::from_str("\"HOLD\"").unwrap();
        assert_eq!(parsed, SignalType::Hold);
    }

    #[test]
    fn signal_decodes_backend_shape() {
        let body = r#"{
            "id": "4b4aa20f-4f21-4d6f-8a6a-2a8d9e6e8f01",
            "symbol": "BTC-USD",
            "timestamp": "2025-01-15T12:00:00Z",
            "signal_type": "SELL",
            "strength": 72.5,
            "reasoning": ["RSI overbought", "MACD crossover"],
            "price_at_signal": null
        }"#;
        let signal: Signal = serde_json::from_str(body).unwrap();
        assert_eq!(signal.symbol, "BTC-USD");
        assert_eq!(signal.signal_type, SignalType::Sell);
        assert_eq!(signal.reasoning.len(), 2);
        assert!(signal.price_at_signal.is_none());
    }
}
