#![allow(clippy::must_use_candidate)]

pub mod auth;
pub mod cors;
mod env;
pub mod health;
pub mod imagegen;
mod loader;
pub mod rate_limit;
pub mod server;
pub mod upload;

use serde::Deserialize;

pub use auth::*;
pub use cors::*;
pub use health::*;
pub use imagegen::*;
pub use rate_limit::*;
pub use server::*;
pub use upload::*;

/// Top-level gateway configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Shared-secret API key gate
    #[serde(default)]
    pub auth: AuthConfig,
    /// Upload spooling and validation
    #[serde(default)]
    pub upload: UploadConfig,
    /// Inference provider configuration
    #[serde(default)]
    pub imagegen: ImageGenConfig,
}
