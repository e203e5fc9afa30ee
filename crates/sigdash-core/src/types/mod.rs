//! Wire types for the signals backend.
//!
//! Field sets mirror the backend's response schemas exactly; everything here
//! is plain serde data with no behavior beyond display helpers.

pub mod backtest;
pub mod market;
pub mod signal;
pub mod subscribe;

pub use backtest::*;
pub use market::*;
pub use signal::*;
pub use subscribe::*;
