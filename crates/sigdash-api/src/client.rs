//! The request executor.
//!
//! Every endpoint helper funnels through [`ApiClient::execute`], which owns
//! the full request contract:
//!
//! 1. URL = base address + endpoint path + query parameters, each pair
//!    URL-encoded once, in insertion order.
//! 2. Method defaults to `GET`.
//! 3. `Content-Type: application/json` is injected for non-GET requests and
//!    for any request with a body, unless the caller set one; a caller's
//!    `Content-Type` is never overwritten.
//! 4. Cookies are never forwarded: the backend is stateless and the shared
//!    `reqwest::Client` is built without a cookie store.
//! 5. Non-success statuses become one [`ApiError::Api`] message (backend
//!    `detail` over `message`, status line as the last resort); the raw
//!    response never reaches the caller.
//!
//! No retries, no caching, no layer-level timeout.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use sigdash_core::config::ApiConfig;
use tracing::debug;

use crate::error::{ApiError, ApiResult};

/// Per-request options for [`ApiClient::execute`].
///
/// The default is a bare GET: no params, no headers, no body.
#[derive(Debug, Default)]
pub struct RequestOptions {
    /// Effective method; `None` means `GET`.
    pub method: Option<Method>,
    /// Caller headers, applied before the `Content-Type` rule.
    pub headers: Vec<(String, String)>,
    /// Query parameters, appended in order. Values are always strings; no
    /// type coercion happens here.
    pub params: Vec<(String, String)>,
    /// JSON body, serialized exactly once at send time.
    pub body: Option<serde_json::Value>,
}

/// Shared HTTP client bound to one base address.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client against the configured base address.
    pub fn new(config: &ApiConfig) -> Self {
        // reqwest keeps no cookie store unless one is installed, which is
        // exactly the credentials policy this API wants.
        Self { http: Client::new(), base_url: config.base_url.clone() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one request and parse the JSON response into `T`.
    ///
    /// A parse failure on a *success* status propagates as
    /// [`ApiError::Parse`]; callers must tolerate it.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        opts: RequestOptions,
    ) -> ApiResult<T> {
        let response = self.send(endpoint, opts).await?;
        Self::handle_response(response).await
    }

    /// GET with a query mapping.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> ApiResult<T> {
        let opts = RequestOptions {
            params: params.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            ..Default::default()
        };
        self.execute(endpoint, opts).await
    }

    /// POST with a JSON-serialized body.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        data: &B,
    ) -> ApiResult<T> {
        let opts = RequestOptions {
            method: Some(Method::POST),
            body: Some(serde_json::to_value(data)?),
            ..Default::default()
        };
        self.execute(endpoint, opts).await
    }

    /// Issue a GET and hand back the raw response.
    ///
    /// Escape hatch for callers that carry their own response contract (the
    /// confirmation flow); everything else goes through [`execute`](Self::execute).
    pub async fn get_response(&self, endpoint: &str) -> ApiResult<Response> {
        self.send(endpoint, RequestOptions::default()).await
    }

    async fn send(&self, endpoint: &str, opts: RequestOptions) -> ApiResult<Response> {
        let method = opts.method.unwrap_or(Method::GET);
        let url = build_url(&self.base_url, endpoint, &opts.params);
        let headers = effective_headers(&method, opts.body.is_some(), &opts.headers)?;

        debug!("{method} {url}");
        let mut request = self.http.request(method, &url).headers(headers);
        if let Some(body) = opts.body {
            request = request.body(serde_json::to_vec(&body)?);
        }
        Ok(request.send().await?)
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        if status.is_success() {
            let body = response.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::Api(normalize_error_message(status, &body)))
        }
    }
}

/// Resolve the absolute URL: base + endpoint, then each query pair in
/// insertion order, URL-encoded.
fn build_url(base: &str, endpoint: &str, params: &[(String, String)]) -> String {
    let mut url = format!("{base}{endpoint}");
    if !params.is_empty() {
        let query: String = params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        url.push('?');
        url.push_str(&query);
    }
    url
}

/// Apply the header rule: caller headers first, then inject
/// `Content-Type: application/json` for non-GET or body-carrying requests
/// unless the caller already set one.
fn effective_headers(
    method: &Method,
    has_body: bool,
    caller: &[(String, String)],
) -> ApiResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in caller {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ApiError::Header(name.clone()))?;
        let value =
            HeaderValue::from_str(value).map_err(|_| ApiError::Header(value.clone()))?;
        headers.insert(name, value);
    }
    if (*method != Method::GET || has_body) && !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    Ok(headers)
}

/// Extract one displayable message from a failed response.
///
/// Priority: body `detail` string > body `message` string > status line.
fn normalize_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(serde_json::Value::Object(fields)) = serde_json::from_str(body) {
        for key in ["detail", "message"] {
            if let Some(text) = fields.get(key).and_then(serde_json::Value::as_str) {
                return text.to_string();
            }
        }
    }
    format!("API Error: {} {}", status.as_u16(), status.canonical_reason().unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn build_url_without_params() {
        assert_eq!(
            build_url("http://localhost:8000", "/api/signals/", &[]),
            "http://localhost:8000/api/signals/"
        );
    }

    #[test]
    fn build_url_preserves_insertion_order() {
        let url = build_url(
            "http://localhost:8000",
            "/api/signals/",
            &pairs(&[("signal_type", "BUY"), ("min_strength", "55.5"), ("limit", "20")]),
        );
        assert_eq!(
            url,
            "http://localhost:8000/api/signals/?signal_type=BUY&min_strength=55.5&limit=20"
        );
    }

    #[test]
    fn build_url_encodes_pairs() {
        let url = build_url("http://x", "/api/search", &pairs(&[("q", "a b&c")]));
        assert_eq!(url, "http://x/api/search?q=a%20b%26c");
    }

    #[test]
    fn get_without_body_gets_no_content_type() {
        let headers = effective_headers(&Method::GET, false, &[]).unwrap();
        assert!(!headers.contains_key(CONTENT_TYPE));
    }

    #[test]
    fn post_gets_json_content_type() {
        let headers = effective_headers(&Method::POST, true, &[]).unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn get_with_body_gets_json_content_type() {
        let headers = effective_headers(&Method::GET, true, &[]).unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn caller_content_type_is_never_overwritten() {
        let headers = effective_headers(
            &Method::POST,
            true,
            &pairs(&[("Content-Type", "text/plain")]),
        )
        .unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "text/plain");
    }

    #[test]
    fn detail_beats_message() {
        let msg = normalize_error_message(
            StatusCode::BAD_REQUEST,
            r#"{"detail":"X","message":"Y"}"#,
        );
        assert_eq!(msg, "X");
    }

    #[test]
    fn message_used_when_detail_missing() {
        let msg =
            normalize_error_message(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message":"Y"}"#);
        assert_eq!(msg, "Y");
    }

    #[test]
    fn unparseable_body_falls_back_to_status_line() {
        let msg = normalize_error_message(StatusCode::NOT_FOUND, "<html>boom</html>");
        assert_eq!(msg, "API Error: 404 Not Found");
    }

    #[test]
    fn non_object_body_falls_back_to_status_line() {
        let msg = normalize_error_message(StatusCode::NOT_FOUND, r#"["detail"]"#);
        assert_eq!(msg, "API Error: 404 Not Found");
    }

    #[test]
    fn non_string_detail_falls_back() {
        let msg = normalize_error_message(StatusCode::NOT_FOUND, r#"{"detail":42}"#);
        assert_eq!(msg, "API Error: 404 Not Found");
    }

    #[tokio::test]
    async fn handle_response_normalizes_error_status() {
        let response = reqwest::Response::from(
            http::Response::builder()
                .status(400)
                .body(r#"{"detail":"X"}"#)
                .unwrap(),
        );
        let result: ApiResult<serde_json::Value> = ApiClient::handle_response(response).await;
        match result {
            Err(ApiError::Api(msg)) => assert_eq!(msg, "X"),
            other => panic!("expected ApiError::Api, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn handle_response_parses_success_body() {
        let response = reqwest::Response::from(
            http::Response::builder().status(200).body(r#"{"total":3}"#).unwrap(),
        );
        let value: serde_json::Value = ApiClient::handle_response(response).await.unwrap();
        assert_eq!(value["total"], 3);
    }

    #[tokio::test]
    async fn handle_response_surfaces_parse_error_on_success_status() {
        let response = reqwest::Response::from(
            http::Response::builder().status(200).body("not json").unwrap(),
        );
        let result: ApiResult<serde_json::Value> = ApiClient::handle_response(response).await;
        assert!(matches!(result, Err(ApiError::Parse(_))));
    }
}
