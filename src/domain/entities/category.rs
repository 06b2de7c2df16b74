//! Category entity and repository trait.
//!
//! Maps to the `categories` table. Categories are managed outside this
//! service; servers reference them by id and the list endpoint filters on
//! their name.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Represents a server category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Primary key
    pub id: i64,

    /// Unique category name (e.g. "gaming")
    pub name: String,

    /// Category description
    pub description: Option<String>,
}

/// Repository trait for Category lookups.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Find a category by its ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, AppError>;
}
