//! Icon storage trait.
//!
//! Data access contract for persisted upload content, implemented in the
//! infrastructure layer.

use async_trait::async_trait;

use crate::shared::error::AppError;

/// Storage abstraction for validated server icons.
#[async_trait]
pub trait IconStorage: Send + Sync {
    /// Persist icon bytes under the given file name and return the public
    /// URL/path the stored icon is served from.
    async fn store_icon(&self, file_name: &str, data: &[u8]) -> Result<String, AppError>;
}
