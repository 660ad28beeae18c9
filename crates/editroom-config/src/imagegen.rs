use secrecy::SecretString;
use serde::Deserialize;

/// Pinned model identifier, matching the production deployment
pub const DEFAULT_MODEL: &str =
    "black-forest-labs/flux-lora:1c638b7bdfac18ad5a1bcbbf2da61e9f4dd732e6f8cb40c9a49b6ecfc43bfe3d";

/// Inference provider configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageGenConfig {
    /// Provider API credential
    #[serde(default = "empty_secret")]
    pub api_key: SecretString,
    /// Model identifier in `owner/name:version` form
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL override (used by tests to point at a mock)
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for ImageGenConfig {
    fn default() -> Self {
        Self {
            api_key: empty_secret(),
            model: default_model(),
            base_url: None,
        }
    }
}

fn empty_secret() -> SecretString {
    SecretString::from("")
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
