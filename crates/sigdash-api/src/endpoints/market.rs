//! Market-data endpoints.
//!
//! | Operation   | Method | Path                                  |
//! |-------------|--------|---------------------------------------|
//! | OHLCV       | GET    | `/api/market-data/{symbol}/ohlcv`     |
//! | Indicators  | GET    | `/api/market-data/{symbol}/indicators`|
//! | Health      | GET    | `/health`                             |

use sigdash_core::types::{Candle, HealthCheck, IndicatorPoint};

use crate::client::ApiClient;
use crate::error::ApiResult;

/// Named time ranges accepted by the OHLCV endpoint. Anything else is
/// rejected server-side with a 400 `detail` listing the valid options.
pub const VALID_RANGES: &[&str] = &["1d", "1w", "1m", "3m", "6m", "1y", "2y"];

impl ApiClient {
    /// Fetch OHLCV candles for a symbol, most recent first.
    ///
    /// `range` is a named window (`"1m"`, `"1y"`, ...); when given, results
    /// are filtered to it and the backend raises its row cap.
    pub async fn ohlcv(
        &self,
        symbol: &str,
        limit: Option<u32>,
        range: Option<&str>,
    ) -> ApiResult<Vec<Candle>> {
        let limit_str;
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(limit) = limit {
            limit_str = limit.to_string();
            params.push(("limit", &limit_str));
        }
        if let Some(range) = range {
            params.push(("range", range));
        }
        self.get(&format!("/api/market-data/{symbol}/ohlcv"), &params).await
    }

    /// Fetch computed indicator rows (RSI, EMA, MACD) for a symbol.
    pub async fn indicators(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> ApiResult<Vec<IndicatorPoint>> {
        let limit_str;
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(limit) = limit {
            limit_str = limit.to_string();
            params.push(("limit", &limit_str));
        }
        self.get(&format!("/api/market-data/{symbol}/indicators"), &params).await
    }

    /// Backend health check (API + database connectivity).
    pub async fn health(&self) -> ApiResult<HealthCheck> {
        self.get("/health", &[]).await
    }
}
