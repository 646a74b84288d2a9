//! Scoped temporary-file lifecycle for uploaded request bodies.
//!
//! Uploaded bytes are spooled to disk for the duration of the provider
//! call and removed unconditionally afterwards, whether the call
//! succeeded or failed.

use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::error::AppError;

pub struct UploadSpool {
    path: PathBuf,
}

impl UploadSpool {
    /// Write uploaded bytes to a unique file under the system temp directory.
    pub async fn write(label: &str, data: &[u8]) -> Result<Self, AppError> {
        let path = std::env::temp_dir().join(format!("relay-{}-{}", label, Uuid::new_v4()));
        fs::write(&path, data).await?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read(&self) -> Result<Vec<u8>, AppError> {
        Ok(fs::read(&self.path).await?)
    }

    /// Remove the spool file. Deletion failures are logged, not propagated.
    pub async fn release(self) {
        if let Err(e) = fs::remove_file(&self.path).await {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove spooled upload"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn write_read_release_roundtrip() {
        let spool = UploadSpool::write("test", b"hello").await.unwrap();
        let path = spool.path().to_path_buf();

        assert_eq!(spool.read().await.unwrap(), b"hello".to_vec());

        spool.release().await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn release_tolerates_missing_file() {
        let spool = UploadSpool::write("test", b"bytes").await.unwrap();
        fs::remove_file(spool.path()).await.unwrap();

        // Must log and return, not panic.
        spool.release().await;
    }
}
