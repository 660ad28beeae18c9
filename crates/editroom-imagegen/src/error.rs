use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EditError>;

/// Edit-room errors with their HTTP mappings
///
/// Validation failures carry the literal messages the mobile client matches
/// on; anything that happens after validation collapses into a 500 with the
/// underlying cause in `details`.
#[derive(Debug, Error)]
pub enum EditError {
    /// Prompt field absent or empty
    #[error("Prompt is required")]
    MissingPrompt,

    /// Image file part absent
    #[error("Image file is required")]
    MissingImage,

    /// Upload content type outside the accepted set
    #[error("Only JPG, PNG, WebP allowed")]
    UnsupportedImageType(String),

    /// Upload exceeds the configured size cap
    #[error("File too large")]
    FileTooLarge,

    /// Request body was not parseable as multipart/form-data
    #[error("Invalid multipart request: {0}")]
    BadMultipart(String),

    /// Wrong request content type
    #[error("Unsupported Content-Type, expected 'multipart/form-data'")]
    UnsupportedMediaType,

    /// Provider call failed or returned a failed prediction
    #[error("{0}")]
    Upstream(String),

    /// Spool file I/O failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EditError {
    /// HTTP status code for this error
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingPrompt
            | Self::MissingImage
            | Self::UnsupportedImageType(_)
            | Self::FileTooLarge
            | Self::BadMultipart(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Upstream(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EditError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = if status.is_server_error() {
            tracing::error!(error = %self, "edit-room request failed");
            json!({ "error": "Server error", "details": self.to_string() })
        } else {
            tracing::warn!(error = %self, "edit-room request rejected");
            json!({ "error": self.to_string() })
        };

        (status, Json(body)).into_response()
    }
}
