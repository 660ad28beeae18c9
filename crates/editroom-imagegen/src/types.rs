use serde::Serialize;

/// Parsed `/edit-room` multipart form
///
/// Presence of the fields is checked in the handler so the validation
/// messages stay in one place; type and size of the image part are enforced
/// during extraction.
#[derive(Debug)]
pub struct EditRequest {
    /// Instruction for the model
    pub prompt: Option<String>,
    /// Uploaded image
    pub image: Option<ImagePart>,
}

/// One uploaded file part
#[derive(Debug)]
pub struct ImagePart {
    /// Raw file bytes
    pub bytes: Vec<u8>,
    /// Declared content type (already validated against the allow list)
    pub content_type: String,
    /// Original filename, for logging only
    pub filename: String,
}

/// Wire call handed to the provider
#[derive(Debug)]
pub(crate) struct EditCall {
    pub prompt: String,
    /// Image as a base64 data URI
    pub image: String,
}

/// Response envelope for a successful edit
#[derive(Debug, Serialize)]
pub struct EditResponse {
    /// Provider output, passed through unmodified
    pub edited_image: serde_json::Value,
}
