//! # sigdash-api
//!
//! Typed HTTP access layer for the signals backend:
//!
//! - **Client** (`client`) — the request executor every endpoint goes
//!   through, plus `get`/`post` convenience wrappers
//! - **Errors** (`error`) — the single normalized [`ApiError`]
//! - **Endpoints** (`endpoints`) — one thin typed helper per backend route
//! - **Confirmation** (`confirm`) — the subscription-confirmation state
//!   machine with its delayed-redirect timer

pub mod client;
pub mod confirm;
pub mod endpoints;
pub mod error;

pub use client::{ApiClient, RequestOptions};
pub use error::{ApiError, ApiResult};
