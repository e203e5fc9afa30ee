//! Email-subscription endpoints.
//!
//! | Operation   | Method | Path                                |
//! |-------------|--------|-------------------------------------|
//! | Subscribe   | POST   | `/api/subscribe/`                   |
//! | Unsubscribe | POST   | `/api/subscribe/unsubscribe/{token}`|
//!
//! Confirmation (`GET /api/subscribe/confirm/{token}`) lives in
//! [`crate::confirm`] because it carries its own response contract.

use serde::Serialize;
use sigdash_core::types::SubscribeResponse;

use crate::client::ApiClient;
use crate::error::ApiResult;

#[derive(Debug, Serialize)]
struct SubscribeRequest<'a> {
    email: &'a str,
}

impl ApiClient {
    /// Subscribe an email address to signal notifications.
    ///
    /// The backend answers 200 with a pending/reactivated/already-subscribed
    /// message; invalid addresses come back as a 422 the executor normalizes.
    pub async fn subscribe(&self, email: &str) -> ApiResult<SubscribeResponse> {
        self.post("/api/subscribe/", &SubscribeRequest { email }).await
    }

    /// Unsubscribe using the opaque token from a notification email.
    pub async fn unsubscribe(&self, token: &str) -> ApiResult<SubscribeResponse> {
        // POST with an empty JSON body; the token rides in the path.
        self.post(&format!("/api/subscribe/unsubscribe/{token}"), &serde_json::json!({}))
            .await
    }
}
