#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

mod error;
mod window;

pub use error::RateLimitError;
pub use window::FixedWindowLimiter;

use editroom_config::RateLimitConfig;

/// Create a per-client request limiter from configuration
pub fn create_request_limiter(config: &RateLimitConfig) -> Result<FixedWindowLimiter, RateLimitError> {
    let window = duration_str::parse(&config.per_client.window).map_err(|e| {
        RateLimitError::Config(format!("invalid duration '{}': {e}", config.per_client.window))
    })?;

    tracing::debug!(
        requests = config.per_client.requests,
        window = %config.per_client.window,
        "request rate limiter created"
    );

    FixedWindowLimiter::new(config.per_client.requests, window)
}
