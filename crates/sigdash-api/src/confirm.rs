//! Subscription-confirmation workflow.
//!
//! A small state machine around `GET /api/subscribe/confirm/{token}`:
//!
//! ```text
//! Loading ──(empty token)──────────────▶ Error
//! Loading ──(2xx {message, email})─────▶ Success ──(3 s timer)──▶ navigate
//! Loading ──(non-2xx {detail})─────────▶ Error
//! Loading ──(transport / bad body)─────▶ Error
//! ```
//!
//! `Success` and `Error` are terminal; the request is issued at most once.
//!
//! The confirmation endpoint predates the executor's error normalization and
//! keeps its own contract: failures carry only a `detail` field, with the
//! literal fallbacks below. The flow therefore takes the raw response from
//! [`ApiClient::get_response`] instead of going through
//! [`ApiClient::execute`].
//!
//! On success a one-shot redirect to the signal listing is scheduled after a
//! fixed delay. The timer is owned by the flow and aborted on
//! [`cancel_redirect`](ConfirmationFlow::cancel_redirect) or drop, so a torn-down
//! flow can never navigate.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Response;
use sigdash_core::types::ConfirmResponse;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::client::ApiClient;

/// Delay between a successful confirmation and the redirect.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(3);

/// Redirect target: the signal listing page.
pub const REDIRECT_PATH: &str = "/signals";

const INVALID_LINK: &str = "Invalid confirmation link";
const CONFIRMATION_FAILED: &str = "Confirmation failed";
const NETWORK_ERROR: &str = "Network error. Please try again.";

/// Where the flow is, plus what to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmState {
    /// Mounted, request not yet resolved.
    Loading,
    /// Confirmed; `email` is the now-active subscriber address.
    Success { message: String, email: String },
    /// Terminal failure with a displayable message.
    Error { message: String },
}

/// Navigation sink for the delayed redirect.
///
/// The UI shell supplies the real implementation; tests record calls.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// One confirmation attempt, from mount to terminal state.
pub struct ConfirmationFlow {
    client: ApiClient,
    navigator: Arc<dyn Navigator>,
    state: ConfirmState,
    redirect: Option<JoinHandle<()>>,
}

impl ConfirmationFlow {
    pub fn new(client: ApiClient, navigator: Arc<dyn Navigator>) -> Self {
        Self { client, navigator, state: ConfirmState::Loading, redirect: None }
    }

    pub fn state(&self) -> &ConfirmState {
        &self.state
    }

    /// Drive the flow to a terminal state.
    ///
    /// A no-op once out of `Loading`: terminal states never transition
    /// again, and the network call is issued at most once.
    pub async fn run(&mut self, token: &str) {
        if self.state != ConfirmState::Loading {
            return;
        }

        if token.trim().is_empty() {
            self.transition(ConfirmState::Error { message: INVALID_LINK.to_string() });
            return;
        }

        let endpoint = format!("/api/subscribe/confirm/{token}");
        let next = match self.client.get_response(&endpoint).await {
            Ok(response) => interpret_response(response).await,
            Err(e) => {
                error!("confirmation request failed: {e}");
                ConfirmState::Error { message: NETWORK_ERROR.to_string() }
            }
        };
        self.transition(next);
    }

    /// Abort a pending redirect (teardown before the timer fires).
    pub fn cancel_redirect(&mut self) {
        if let Some(handle) = self.redirect.take() {
            handle.abort();
        }
    }

    /// Wait until the pending redirect has fired, if one is scheduled.
    pub async fn finish_redirect(&mut self) {
        if let Some(handle) = self.redirect.take() {
            let _ = handle.await;
        }
    }

    fn transition(&mut self, next: ConfirmState) {
        if let ConfirmState::Success { ref email, .. } = next {
            info!("subscription confirmed for {email}");
            self.schedule_redirect();
        }
        self.state = next;
    }

    fn schedule_redirect(&mut self) {
        let navigator = Arc::clone(&self.navigator);
        self.redirect = Some(tokio::spawn(async move {
            tokio::time::sleep(REDIRECT_DELAY).await;
            navigator.navigate(REDIRECT_PATH);
        }));
    }
}

impl Drop for ConfirmationFlow {
    fn drop(&mut self) {
        self.cancel_redirect();
    }
}

/// Map the confirmation endpoint's response onto a terminal state.
///
/// This deliberately does *not* reuse the executor's `detail`/`message`
/// priority rule; see the module docs.
async fn interpret_response(response: Response) -> ConfirmState {
    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            error!("confirmation response unreadable: {e}");
            return ConfirmState::Error { message: NETWORK_ERROR.to_string() };
        }
    };

    if status.is_success() {
        match serde_json::from_str::<ConfirmResponse>(&body) {
            Ok(ok) => ConfirmState::Success { message: ok.message, email: ok.email },
            Err(e) => {
                error!("confirmation body malformed: {e}");
                ConfirmState::Error { message: NETWORK_ERROR.to_string() }
            }
        }
    } else {
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string));
        ConfirmState::Error {
            message: detail.unwrap_or_else(|| CONFIRMATION_FAILED.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigdash_core::config::ApiConfig;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNavigator {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingNavigator {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, path: &str) {
            self.calls.lock().unwrap().push(path.to_string());
        }
    }

    fn flow() -> (ConfirmationFlow, Arc<RecordingNavigator>) {
        // Nothing listens on this address; any network attempt fails fast.
        let client = ApiClient::new(&ApiConfig::with_base_url("http://127.0.0.1:9"));
        let navigator = Arc::new(RecordingNavigator::default());
        (ConfirmationFlow::new(client, Arc::clone(&navigator) as Arc<dyn Navigator>), navigator)
    }

    fn canned(status: u16, body: &'static str) -> Response {
        Response::from(http::Response::builder().status(status).body(body).unwrap())
    }

    #[tokio::test]
    async fn empty_token_errors_without_network() {
        let (mut flow, navigator) = flow();
        flow.run("  ").await;
        assert_eq!(
            flow.state(),
            &ConfirmState::Error { message: "Invalid confirmation link".to_string() }
        );
        assert!(navigator.calls().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_maps_to_network_error() {
        let (mut flow, _navigator) = flow();
        flow.run("sometoken").await;
        assert_eq!(
            flow.state(),
            &ConfirmState::Error { message: "Network error. Please try again.".to_string() }
        );
    }

    #[tokio::test]
    async fn terminal_state_never_transitions_again() {
        let (mut flow, _navigator) = flow();
        flow.run("").await;
        let first = flow.state().clone();
        // A second run with a valid-looking token must not re-enter Loading
        // or touch the network.
        flow.run("sometoken").await;
        assert_eq!(flow.state(), &first);
    }

    #[tokio::test]
    async fn success_body_parses_message_and_email() {
        let state =
            interpret_response(canned(200, r#"{"message":"Confirmed","email":"a@b.com"}"#))
                .await;
        assert_eq!(
            state,
            ConfirmState::Success {
                message: "Confirmed".to_string(),
                email: "a@b.com".to_string()
            }
        );
    }

    #[tokio::test]
    async fn failure_body_uses_detail() {
        let state = interpret_response(canned(400, r#"{"detail":"Token expired"}"#)).await;
        assert_eq!(state, ConfirmState::Error { message: "Token expired".to_string() });
    }

    #[tokio::test]
    async fn failure_without_detail_uses_fallback_literal() {
        let state = interpret_response(canned(400, r#"{"message":"ignored"}"#)).await;
        assert_eq!(state, ConfirmState::Error { message: "Confirmation failed".to_string() });
    }

    #[tokio::test]
    async fn malformed_success_body_maps_to_network_error() {
        let state = interpret_response(canned(200, "not json")).await;
        assert_eq!(
            state,
            ConfirmState::Error { message: "Network error. Please try again.".to_string() }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn redirect_fires_only_after_delay() {
        let (mut flow, navigator) = flow();
        flow.transition(ConfirmState::Success {
            message: "Confirmed".to_string(),
            email: "a@b.com".to_string(),
        });

        // Let the spawned timer task register its sleep.
        tokio::task::yield_now().await;
        assert!(navigator.calls().is_empty());

        tokio::time::advance(Duration::from_millis(2900)).await;
        tokio::task::yield_now().await;
        assert!(navigator.calls().is_empty(), "redirect fired before the 3 s delay");

        tokio::time::advance(Duration::from_millis(200)).await;
        flow.finish_redirect().await;
        assert_eq!(navigator.calls(), vec![REDIRECT_PATH.to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_redirect_never_navigates() {
        let (mut flow, navigator) = flow();
        flow.transition(ConfirmState::Success {
            message: "Confirmed".to_string(),
            email: "a@b.com".to_string(),
        });
        tokio::task::yield_now().await;

        flow.cancel_redirect();
        tokio::time::advance(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
        assert!(navigator.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_pending_redirect() {
        let (mut flow, navigator) = flow();
        flow.transition(ConfirmState::Success {
            message: "Confirmed".to_string(),
            email: "a@b.com".to_string(),
        });
        tokio::task::yield_now().await;

        drop(flow);
        tokio::time::advance(Duration::from_secs(5)).await;
        tokio::task::yield_now().await;
        assert!(navigator.calls().is_empty());
    }
}
