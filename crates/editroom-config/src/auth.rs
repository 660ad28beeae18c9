use secrecy::SecretString;
use serde::Deserialize;

/// Shared-secret gate applied to every request
///
/// The mobile client sends the secret in a fixed header; requests without a
/// matching value are rejected with 403 before any handler runs.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Secret the client must present
    #[serde(default = "empty_secret")]
    pub app_key: SecretString,
    /// Header carrying the secret
    #[serde(default = "default_header_name")]
    pub header_name: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            app_key: empty_secret(),
            header_name: default_header_name(),
        }
    }
}

fn empty_secret() -> SecretString {
    SecretString::from("")
}

fn default_header_name() -> String {
    "x-api-key".to_string()
}
