//! Normalized error type for the API access layer.
//!
//! The executor is the single normalization boundary for HTTP-level
//! problems: callers never see raw status codes, only an [`ApiError`] whose
//! `Display` output is suitable for direct display to the user.

use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by [`ApiClient`](crate::ApiClient).
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success HTTP status, already normalized into one message
    /// (backend `detail` > backend `message` > status line).
    #[error("{0}")]
    Api(String),

    /// Transport-level failure: unreachable host, DNS, TLS, aborted body.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body on a success status was not valid JSON for the expected
    /// type. Deliberately not normalized away; callers must tolerate it.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A caller-supplied header name or value was not valid HTTP.
    #[error("invalid header '{0}'")]
    Header(String),
}
