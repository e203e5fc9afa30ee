//! Subscription and health-check response types.

use serde::{Deserialize, Serialize};

/// Response to subscribe/unsubscribe requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeResponse {
    pub message: String,
    pub email: String,
}

/// Success body of `GET /api/subscribe/confirm/{token}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmResponse {
    pub message: String,
    pub email: String,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub database: String,
}
