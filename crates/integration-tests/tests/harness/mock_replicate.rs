//! Mock Replicate backend for integration tests
//!
//! Implements the predictions endpoint and returns canned outputs

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// Canned output URL the mock hands back for successful predictions
pub const MOCK_OUTPUT: &str = "https://replicate.delivery/mock/edited.webp";

/// What the mock should do with incoming predictions
#[derive(Clone, Copy)]
enum Mode {
    Succeed,
    HttpError,
    FailedPrediction,
}

/// Mock Replicate backend that returns predictable responses
pub struct MockReplicate {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    prediction_count: AtomicU32,
    mode: Mode,
    /// Body of the most recent prediction request
    last_request: Mutex<Option<serde_json::Value>>,
}

impl MockReplicate {
    /// Start a mock that succeeds every prediction
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(Mode::Succeed).await
    }

    /// Start a mock that answers predictions with HTTP 500
    pub async fn start_http_error() -> anyhow::Result<Self> {
        Self::start_inner(Mode::HttpError).await
    }

    /// Start a mock that returns predictions in the `failed` state
    pub async fn start_failed_prediction() -> anyhow::Result<Self> {
        Self::start_inner(Mode::FailedPrediction).await
    }

    async fn start_inner(mode: Mode) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            prediction_count: AtomicU32::new(0),
            mode,
            last_request: Mutex::new(None),
        });

        let app = Router::new()
            .route("/predictions", routing::post(handle_prediction))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the provider backend
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Number of prediction requests received
    pub fn prediction_count(&self) -> u32 {
        self.state.prediction_count.load(Ordering::Relaxed)
    }

    /// Body of the most recent prediction request, if any
    pub fn last_request(&self) -> Option<serde_json::Value> {
        self.state.last_request.lock().unwrap().clone()
    }
}

impl Drop for MockReplicate {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_prediction(
    State(state): State<Arc<MockState>>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    state.prediction_count.fetch_add(1, Ordering::Relaxed);
    *state.last_request.lock().unwrap() = Some(body);

    match state.mode {
        Mode::Succeed => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "id": "mock-prediction-1",
                "status": "succeeded",
                "output": MOCK_OUTPUT,
                "error": null,
            })),
        )
            .into_response(),
        Mode::HttpError => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "detail": "mock upstream failure" })),
        )
            .into_response(),
        Mode::FailedPrediction => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "id": "mock-prediction-1",
                "status": "failed",
                "output": null,
                "error": "NSFW content detected",
            })),
        )
            .into_response(),
    }
}
