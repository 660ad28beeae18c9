//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::path::Path;

use editroom_config::{
    AuthConfig, Config, CorsConfig, HealthConfig, RateLimitConfig, RequestRateLimit, ServerConfig,
};
use secrecy::SecretString;

/// Shared secret used by the test client
pub const APP_KEY: &str = "test-app-key";

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    ..ServerConfig::default()
                },
                auth: AuthConfig {
                    app_key: SecretString::from(APP_KEY),
                    ..AuthConfig::default()
                },
                upload: editroom_config::UploadConfig::default(),
                imagegen: editroom_config::ImageGenConfig::default(),
            },
        }
    }

    /// Point the provider at a mock backend
    pub fn with_provider(mut self, base_url: &str) -> Self {
        self.config.imagegen.api_key = SecretString::from("r8_test");
        self.config.imagegen.base_url = Some(base_url.to_owned());
        self
    }

    /// Spool uploads into the given directory
    pub fn with_upload_dir(mut self, dir: &Path) -> Self {
        self.config.upload.dir = dir.to_path_buf();
        self
    }

    /// Cap uploaded file size
    pub fn with_max_file_bytes(mut self, max: usize) -> Self {
        self.config.upload.max_file_bytes = max;
        self
    }

    /// Set rate limit configuration
    pub fn with_rate_limit(mut self, requests: u32, window: &str) -> Self {
        self.config.server.rate_limit = RateLimitConfig {
            enabled: true,
            per_client: RequestRateLimit {
                requests,
                window: window.to_owned(),
            },
        };
        self
    }

    /// Disable rate limiting
    pub fn without_rate_limit(mut self) -> Self {
        self.config.server.rate_limit.enabled = false;
        self
    }

    /// Set CORS configuration
    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
