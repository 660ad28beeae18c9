use serde::Deserialize;

/// Fixed-window rate limiting configuration
///
/// Counters live in process memory only; they reset on restart and are not
/// shared across instances.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateLimitConfig {
    /// Enable the limiter
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Per-client limit applied within each window
    #[serde(default)]
    pub per_client: RequestRateLimit,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            per_client: RequestRateLimit::default(),
        }
    }
}

/// Request budget for one window
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestRateLimit {
    /// Maximum requests per window
    #[serde(default = "default_requests")]
    pub requests: u32,
    /// Window duration (e.g. "1m", "30s")
    #[serde(default = "default_window")]
    pub window: String,
}

impl Default for RequestRateLimit {
    fn default() -> Self {
        Self {
            requests: default_requests(),
            window: default_window(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_enabled() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_requests() -> u32 {
    20
}

fn default_window() -> String {
    "1m".to_string()
}
