use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::EditProvider;
use crate::{
    error::{EditError, Result},
    types::EditCall,
};

/// Default Replicate API base URL
const DEFAULT_BASE_URL: &str = "https://api.replicate.com/v1";

/// Replicate prediction provider
///
/// Issues a blocking prediction (`Prefer: wait`) against a pinned model
/// version, mirroring `replicate.run(...)`. No retry on transient failure.
pub(crate) struct ReplicateProvider {
    client: Client,
    api_key: SecretString,
    base_url: String,
    /// Version hash extracted from the `owner/name:version` model string
    version: String,
    model: String,
}

impl ReplicateProvider {
    /// Create a new Replicate provider for a pinned model version
    pub fn new(api_key: SecretString, model: String, base_url: Option<String>) -> Result<Self> {
        let version = model
            .split_once(':')
            .map(|(_, version)| version.to_string())
            .ok_or_else(|| {
                EditError::Upstream(format!("model '{model}' is not pinned to a version"))
            })?;

        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            version,
            model,
        })
    }
}

/// Wire format for the Replicate predictions API request
#[derive(Serialize)]
struct PredictionRequest<'a> {
    version: &'a str,
    input: PredictionInput<'a>,
}

#[derive(Serialize)]
struct PredictionInput<'a> {
    prompt: &'a str,
    image: &'a str,
}

/// Wire format for the Replicate predictions API response
#[derive(Deserialize)]
struct PredictionResponse {
    status: String,
    #[serde(default)]
    output: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[async_trait]
impl EditProvider for ReplicateProvider {
    async fn edit(&self, call: &EditCall) -> Result<serde_json::Value> {
        let url = format!("{}/predictions", self.base_url.trim_end_matches('/'));

        tracing::debug!(model = %self.model, "sending prediction request");

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Prefer", "wait")
            .json(&PredictionRequest {
                version: &self.version,
                input: PredictionInput {
                    prompt: &call.prompt,
                    image: &call.image,
                },
            })
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "prediction request failed");
                EditError::Upstream(format!("Failed to send request to Replicate: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!(status = %status, "Replicate API error");

            return Err(EditError::Upstream(format!(
                "Replicate API error ({status}): {error_text}"
            )));
        }

        let prediction: PredictionResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse Replicate response");
            EditError::Upstream(format!("Invalid response from Replicate: {e}"))
        })?;

        if matches!(prediction.status.as_str(), "failed" | "canceled") {
            let detail = prediction
                .error
                .map_or_else(|| prediction.status.clone(), |e| e.to_string());
            return Err(EditError::Upstream(format!("Prediction failed: {detail}")));
        }

        tracing::debug!(status = %prediction.status, "prediction complete");

        Ok(prediction.output.unwrap_or(serde_json::Value::Null))
    }

    fn name(&self) -> &str {
        "replicate"
    }
}
