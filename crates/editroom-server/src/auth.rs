use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use secrecy::{ExposeSecret, SecretString};

/// State for the shared-secret gate
pub struct AuthState {
    /// Header the client presents the secret in
    pub header_name: String,
    /// Expected secret
    pub app_key: SecretString,
    /// Exact paths served without the secret (health probes)
    pub public_paths: Vec<String>,
}

/// Gate requests on a static shared secret
///
/// Anything without a matching header value is rejected before handler I/O
/// or outbound calls can happen.
pub async fn api_key_middleware(state: Arc<AuthState>, request: Request, next: Next) -> Response {
    let path = request.uri().path();

    if state.public_paths.iter().any(|p| p == path) {
        return next.run(request).await;
    }

    let presented = request
        .headers()
        .get(&state.header_name)
        .and_then(|v| v.to_str().ok());

    match presented {
        Some(key) if key == state.app_key.expose_secret() => next.run(request).await,
        _ => {
            tracing::warn!(path = %path, "request rejected: missing or invalid API key");
            (
                StatusCode::FORBIDDEN,
                axum::Json(serde_json::json!({ "error": "Not authorized" })),
            )
                .into_response()
        }
    }
}
