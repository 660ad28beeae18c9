use std::path::Path;

use secrecy::ExposeSecret;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded = crate::env::expand_env(&raw)
            .map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self =
            toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// Both secrets are required at startup; a gateway without them can only
    /// reject or fail every request.
    ///
    /// # Errors
    ///
    /// Returns an error if a required secret is empty or a limit is
    /// nonsensical
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.auth.app_key.expose_secret().is_empty() {
            anyhow::bail!("auth.app_key must not be empty (set the APP_KEY environment variable)");
        }

        if self.imagegen.api_key.expose_secret().is_empty() {
            anyhow::bail!(
                "imagegen.api_key must not be empty (set the REPLICATE_API_KEY environment variable)"
            );
        }

        if !self.imagegen.model.contains(':') {
            anyhow::bail!(
                "imagegen.model must be pinned to a version ('owner/name:version'), got '{}'",
                self.imagegen.model
            );
        }

        if self.upload.max_file_bytes == 0 {
            anyhow::bail!("upload.max_file_bytes must be greater than 0");
        }

        if self.upload.allowed_types.is_empty() {
            anyhow::bail!("upload.allowed_types must not be empty");
        }

        if self.server.rate_limit.enabled {
            if self.server.rate_limit.per_client.requests == 0 {
                anyhow::bail!("server.rate_limit.per_client.requests must be greater than 0");
            }
            duration_str::parse(&self.server.rate_limit.per_client.window).map_err(|e| {
                anyhow::anyhow!(
                    "invalid rate limit window '{}': {e}",
                    self.server.rate_limit.per_client.window
                )
            })?;
        }

        Ok(())
    }
}
