//! API base-address resolution.
//!
//! Every endpoint path is resolved against exactly one base address, chosen
//! once at startup:
//!
//! 1. The `SIGDASH_API_URL` environment variable, if set and non-empty.
//! 2. Otherwise a built-in default that switches on build mode:
//!    `http://localhost:8000` in debug builds, the production address in
//!    release builds.

/// Default base address for release builds.
pub const PROD_BASE_URL: &str = "https://api.sigdash.io";

/// Default base address for debug builds (local backend).
pub const DEV_BASE_URL: &str = "http://localhost:8000";

/// Environment variable that overrides the built-in defaults.
pub const BASE_URL_ENV: &str = "SIGDASH_API_URL";

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base address all endpoint paths are resolved against. No trailing
    /// slash; endpoint paths start with `/`.
    pub base_url: String,
}

impl ApiConfig {
    /// Resolve the base address from the environment, falling back to the
    /// build-mode default.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| Self::default_base_url().to_string());
        Self { base_url: trim_trailing_slash(&base_url) }
    }

    /// Build a config with an explicit base address (tests, one-off tools).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: trim_trailing_slash(&base_url.into()) }
    }

    /// The built-in default for the current build mode.
    pub fn default_base_url() -> &'static str {
        if cfg!(debug_assertions) { DEV_BASE_URL } else { PROD_BASE_URL }
    }
}

/// Normalize a configured address so `base + "/api/..."` never produces `//`.
fn trim_trailing_slash(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
