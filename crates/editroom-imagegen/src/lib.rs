#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod provider;
mod request;
mod server;
mod types;
mod upload;

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};

pub use error::{EditError, Result};
pub use server::{EditRoomServerBuilder, Server};
pub use types::{EditRequest, EditResponse, ImagePart};
use request::ExtractEditRequest;

/// Build the edit-room server from configuration
///
/// # Errors
///
/// Returns an error if the server fails to initialize
pub fn build_server(config: &editroom_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        EditRoomServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize edit-room server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for the edit-room feature
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new().route("/edit-room", post(edit_room))
}

/// Handle edit-room requests
async fn edit_room(
    State(server): State<Arc<Server>>,
    ExtractEditRequest(request): ExtractEditRequest,
) -> Result<Json<EditResponse>> {
    tracing::debug!("edit-room handler called");

    let response = server.edit(request).await?;

    tracing::debug!("edit complete");

    Ok(Json(response))
}
