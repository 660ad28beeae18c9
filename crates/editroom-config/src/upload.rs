use std::path::PathBuf;

use serde::Deserialize;

/// Upload spooling and validation configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UploadConfig {
    /// Directory uploads are spooled to before the inference call
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    /// Maximum accepted file size in bytes
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: usize,
    /// Accepted content types
    #[serde(default = "default_allowed_types")]
    pub allowed_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            max_file_bytes: default_max_file_bytes(),
            allowed_types: default_allowed_types(),
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from("uploads")
}

#[allow(clippy::missing_const_for_fn)]
fn default_max_file_bytes() -> usize {
    6 << 20
}

fn default_allowed_types() -> Vec<String> {
    vec![
        "image/jpeg".to_string(),
        "image/png".to_string(),
        "image/webp".to_string(),
    ]
}
