//! Backtest endpoints.
//!
//! | Operation        | Method | Path                      |
//! |------------------|--------|---------------------------|
//! | Backtest summary | GET    | `/api/backtests/{symbol}` |

use sigdash_core::types::BacktestSummary;

use crate::client::ApiClient;
use crate::error::ApiResult;

/// Named windows accepted by the backtest endpoint. Anything else is
/// rejected server-side with a 400 `detail` listing the valid options.
pub const BACKTEST_RANGES: &[&str] = &["1m", "3m", "6m", "1y", "3y", "5y"];

impl ApiClient {
    /// Fetch the backtest summary for a symbol over a named window
    /// (backend default `"1y"`).
    pub async fn backtest_summary(
        &self,
        symbol: &str,
        range: Option<&str>,
    ) -> ApiResult<BacktestSummary> {
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(range) = range {
            params.push(("range", range));
        }
        self.get(&format!("/api/backtests/{symbol}"), &params).await
    }
}
