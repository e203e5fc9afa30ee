//! # sigdash-core
//!
//! Core crate for the sigdash client stack, providing:
//!
//! - **Types** (`types`) — signal, market-data, and subscription wire types
//! - **Configuration** (`config`) — API base-address resolution
//! - **Preference store** (`store`) — persisted subscriber preferences with
//!   pluggable storage backends
//! - **Logging** (`logging`) — tracing-based structured logging

pub mod config;
pub mod logging;
pub mod store;
pub mod types;

// Re-export types at crate root for convenience.
pub use types::*;
