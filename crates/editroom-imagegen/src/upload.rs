use std::path::{Path, PathBuf};

use crate::error::Result;

/// An upload spooled to disk for the duration of one request
///
/// The file gets a unique `millis-uuid.ext` name so concurrent requests never
/// collide. Removal is best effort: `remove` logs and swallows failures, and
/// `Drop` is a backstop for paths that never reach it. A crash between write
/// and removal leaks the file; there is no transactional link.
#[derive(Debug)]
pub(crate) struct SpooledUpload {
    path: PathBuf,
    removed: bool,
}

impl SpooledUpload {
    /// Write `bytes` to a uniquely named file under `dir`
    pub async fn write(dir: &Path, bytes: &[u8], extension: &str) -> Result<Self> {
        tokio::fs::create_dir_all(dir).await?;

        let millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_millis());
        let path = dir.join(format!("{millis}-{}.{extension}", uuid::Uuid::new_v4()));

        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "upload spooled");

        Ok(Self { path, removed: false })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the spooled file back into memory
    pub async fn read(&self) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(&self.path).await?)
    }

    /// Delete the spooled file, logging but never surfacing failures
    pub async fn remove(mut self) {
        self.removed = true;
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to remove spooled upload");
        }
    }
}

impl Drop for SpooledUpload {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to remove spooled upload");
        }
    }
}
