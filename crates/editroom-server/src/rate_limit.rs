use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use editroom_ratelimit::{FixedWindowLimiter, RateLimitError};
use http::StatusCode;

use crate::client_ip::client_ip;

/// Rate limiting middleware using an Arc-wrapped limiter
pub async fn rate_limit_middleware_arc(
    limiter: Arc<FixedWindowLimiter>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_ip(&request);

    match limiter.check(&key) {
        Ok(()) => next.run(request).await,
        Err(RateLimitError::Exceeded { retry_after }) => {
            tracing::warn!(client = %key, retry_after, "rate limit exceeded");

            let body = serde_json::json!({ "error": "Too many requests, try again later." });
            let mut response = (StatusCode::TOO_MANY_REQUESTS, axum::Json(body)).into_response();

            if let Ok(val) = retry_after.to_string().parse() {
                response.headers_mut().insert("retry-after", val);
            }

            response
        }
        Err(e) => {
            tracing::error!(error = %e, "rate limiter error");
            (StatusCode::INTERNAL_SERVER_ERROR, "rate limiter error").into_response()
        }
    }
}
