use base64::Engine as _;
use editroom_config::UploadConfig;

use crate::{
    error::{EditError, Result},
    provider::{EditProvider, replicate::ReplicateProvider},
    types::{EditCall, EditRequest, EditResponse},
    upload::SpooledUpload,
};

/// Edit-room server: spools the upload, runs the prediction, cleans up
pub struct Server {
    provider: Box<dyn EditProvider>,
    upload: UploadConfig,
}

impl Server {
    pub(crate) fn upload_config(&self) -> &UploadConfig {
        &self.upload
    }

    /// Run one edit request end to end
    ///
    /// The spooled file is removed on success and failure alike; only a
    /// crash mid-request leaks it.
    pub async fn edit(&self, request: EditRequest) -> Result<EditResponse> {
        let prompt = request
            .prompt
            .filter(|p| !p.is_empty())
            .ok_or(EditError::MissingPrompt)?;
        let image = request.image.ok_or(EditError::MissingImage)?;

        let subtype = image
            .content_type
            .split_once('/')
            .map_or("jpeg", |(_, subtype)| subtype);

        let spooled = SpooledUpload::write(&self.upload.dir, &image.bytes, subtype).await?;

        tracing::info!(
            provider = %self.provider.name(),
            filename = %image.filename,
            bytes = image.bytes.len(),
            "running edit"
        );

        let result = self.run_prediction(&prompt, &spooled, subtype).await;

        spooled.remove().await;

        Ok(EditResponse { edited_image: result? })
    }

    async fn run_prediction(
        &self,
        prompt: &str,
        spooled: &SpooledUpload,
        subtype: &str,
    ) -> Result<serde_json::Value> {
        let bytes = spooled.read().await?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);

        let call = EditCall {
            prompt: prompt.to_string(),
            image: format!("data:image/{subtype};base64,{encoded}"),
        };

        self.provider.edit(&call).await
    }
}

/// Builder for constructing the edit-room server from configuration
pub struct EditRoomServerBuilder<'a> {
    config: &'a editroom_config::Config,
}

impl<'a> EditRoomServerBuilder<'a> {
    pub fn new(config: &'a editroom_config::Config) -> Self {
        Self { config }
    }

    pub fn build(self) -> Result<Server> {
        let imagegen = &self.config.imagegen;

        tracing::debug!(model = %imagegen.model, "initializing Replicate provider");

        let provider = ReplicateProvider::new(
            imagegen.api_key.clone(),
            imagegen.model.clone(),
            imagegen.base_url.clone(),
        )?;

        Ok(Server {
            provider: Box::new(provider),
            upload: self.config.upload.clone(),
        })
    }
}
