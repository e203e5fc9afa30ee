//! Typed endpoint helpers, one module per backend router.
//!
//! Each helper is a thin method/body/query binding over
//! [`ApiClient`](crate::ApiClient); error normalization lives in the
//! executor alone.

pub mod backtests;
pub mod market;
pub mod signals;
pub mod subscribe;

pub use signals::SignalQuery;
