use std::sync::Arc;

use axum::body::Body;
use axum::response::IntoResponse;

use crate::{
    error::EditError,
    server::Server,
    types::{EditRequest, ImagePart},
};

/// Extractor for the `/edit-room` multipart form
///
/// Enforces the content-type and size invariants of the image part before
/// the handler runs; presence checks stay in the handler so the literal
/// validation messages come from one place.
pub(crate) struct ExtractEditRequest(pub EditRequest);

/// Headroom on top of the file cap for the prompt field and form framing
const BODY_SLACK_BYTES: usize = 2 << 20;

impl axum::extract::FromRequest<Arc<Server>> for ExtractEditRequest {
    type Rejection = axum::response::Response;

    async fn from_request(
        request: http::Request<Body>,
        state: &Arc<Server>,
    ) -> Result<Self, Self::Rejection> {
        let upload = state.upload_config();
        let (parts, body) = request.into_parts();

        let content_type = parts
            .headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("multipart/form-data") {
            return Err(EditError::UnsupportedMediaType.into_response());
        }

        let bytes = axum::body::to_bytes(body, upload.max_file_bytes + BODY_SLACK_BYTES)
            .await
            .map_err(|e| {
                EditError::BadMultipart(format!("failed to read request body: {e}")).into_response()
            })?;

        // Reassemble the request for multipart parsing
        let mut rebuilt = http::Request::builder()
            .method(parts.method.clone())
            .uri(parts.uri.clone());

        for (key, value) in &parts.headers {
            rebuilt = rebuilt.header(key, value);
        }

        let rebuilt = rebuilt.body(Body::from(bytes)).map_err(|e| {
            EditError::BadMultipart(format!("failed to rebuild request: {e}")).into_response()
        })?;

        let mut multipart = axum::extract::Multipart::from_request(rebuilt, &())
            .await
            .map_err(|e| {
                EditError::BadMultipart(format!("failed to parse multipart form: {e}"))
                    .into_response()
            })?;

        let mut prompt: Option<String> = None;
        let mut image: Option<ImagePart> = None;

        while let Ok(Some(field)) = multipart.next_field().await {
            let field_name = field.name().unwrap_or("").to_string();

            match field_name.as_str() {
                "prompt" => {
                    prompt = Some(field.text().await.map_err(|e| {
                        EditError::BadMultipart(format!("failed to read prompt field: {e}"))
                            .into_response()
                    })?);
                }
                "image" => {
                    let file_content_type = field.content_type().unwrap_or("").to_string();

                    if !upload.allowed_types.contains(&file_content_type) {
                        return Err(
                            EditError::UnsupportedImageType(file_content_type).into_response()
                        );
                    }

                    let filename = field.file_name().unwrap_or("upload").to_string();

                    let data = field.bytes().await.map_err(|e| {
                        EditError::BadMultipart(format!("failed to read image data: {e}"))
                            .into_response()
                    })?;

                    if data.len() > upload.max_file_bytes {
                        tracing::warn!(
                            size = data.len(),
                            max_bytes = upload.max_file_bytes,
                            "upload exceeds size cap"
                        );
                        return Err(EditError::FileTooLarge.into_response());
                    }

                    image = Some(ImagePart {
                        bytes: data.to_vec(),
                        content_type: file_content_type,
                        filename,
                    });
                }
                _ => {
                    // Skip unknown fields
                }
            }
        }

        Ok(Self(EditRequest { prompt, image }))
    }
}
