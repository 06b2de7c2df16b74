//! Icon Storage
//!
//! Local filesystem implementation of the IconStorage trait. Validated icons
//! are written under the configured upload directory and served from
//! `/uploads/server_icons/`.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::IconStorage;
use crate::shared::error::AppError;

/// Stores icons on the local filesystem.
#[derive(Clone)]
pub struct LocalIconStorage {
    root: PathBuf,
}

impl LocalIconStorage {
    /// Create a storage rooted at the configured upload directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl IconStorage for LocalIconStorage {
    async fn store_icon(&self, file_name: &str, data: &[u8]) -> Result<String, AppError> {
        let dir = self.root.join("server_icons");
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create upload dir: {}", e)))?;

        let path = dir.join(file_name);
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to store icon: {}", e)))?;

        Ok(format!("/uploads/server_icons/{}", file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_bytes_and_returns_public_path() {
        let dir = std::env::temp_dir().join(format!("icon-storage-test-{}", std::process::id()));
        let storage = LocalIconStorage::new(&dir);

        let url = storage.store_icon("1.png", b"png-bytes").await.unwrap();

        assert_eq!(url, "/uploads/server_icons/1.png");
        let stored = tokio::fs::read(dir.join("server_icons").join("1.png"))
            .await
            .unwrap();
        assert_eq!(stored, b"png-bytes");

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
