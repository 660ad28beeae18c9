pub(crate) mod replicate;

use async_trait::async_trait;

use crate::{error::Result, types::EditCall};

/// Trait for image-edit provider implementations
#[async_trait]
pub(crate) trait EditProvider: Send + Sync {
    /// Run one edit and return the provider's opaque output value
    async fn edit(&self, call: &EditCall) -> Result<serde_json::Value>;

    /// Get the provider name
    fn name(&self) -> &str;
}
