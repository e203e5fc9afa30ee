//! Signal endpoints.
//!
//! | Operation       | Method | Path                          |
//! |-----------------|--------|-------------------------------|
//! | List signals    | GET    | `/api/signals/`               |
//! | Latest signal   | GET    | `/api/signals/{symbol}`       |
//! | Signal history  | GET    | `/api/signals/{symbol}/history` |

use sigdash_core::types::{Signal, SignalList, SignalType};

use crate::client::ApiClient;
use crate::error::ApiResult;

/// Filters for [`ApiClient::list_signals`].
///
/// Only set fields become query parameters; all values are stringified.
#[derive(Debug, Clone, Default)]
pub struct SignalQuery {
    /// Max rows to return (backend default 20, cap 100).
    pub limit: Option<u32>,
    /// Rows to skip, for pagination.
    pub offset: Option<u32>,
    /// Restrict to one direction.
    pub signal_type: Option<SignalType>,
    /// Minimum confidence score, 0–100.
    pub min_strength: Option<f64>,
}

impl SignalQuery {
    /// Render the set fields as ordered query pairs.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(signal_type) = self.signal_type {
            params.push(("signal_type".to_string(), signal_type.as_str().to_string()));
        }
        if let Some(min_strength) = self.min_strength {
            params.push(("min_strength".to_string(), min_strength.to_string()));
        }
        params
    }
}

impl ApiClient {
    /// Fetch signals, newest first, with optional filters.
    pub async fn list_signals(&self, query: &SignalQuery) -> ApiResult<SignalList> {
        let params = query.to_params();
        let borrowed: Vec<(&str, &str)> =
            params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        self.get("/api/signals/", &borrowed).await
    }

    /// Fetch the most recent signal for one symbol.
    pub async fn latest_signal(&self, symbol: &str) -> ApiResult<Signal> {
        self.get(&format!("/api/signals/{symbol}"), &[]).await
    }

    /// Fetch up to `days` days of signal history for one symbol (backend
    /// default 30, cap 90).
    pub async fn signal_history(&self, symbol: &str, days: Option<u32>) -> ApiResult<SignalList> {
        let days_str;
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(days) = days {
            days_str = days.to_string();
            params.push(("days", &days_str));
        }
        self.get(&format!("/api/signals/{symbol}/history"), &params).await
    }
}
