//! Channel entity and repository trait.
//!
//! Maps to the `channels` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Represents a channel within a server.
///
/// Maps to the `channels` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - server_id: BIGINT NOT NULL REFERENCES servers(id)
/// - name: VARCHAR(100) NOT NULL
/// - topic: TEXT NULL
/// - owner_id: BIGINT NOT NULL REFERENCES users(id)
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    /// Snowflake ID (primary key)
    pub id: i64,

    /// Server this channel belongs to
    pub server_id: i64,

    /// Channel name (1-100 characters)
    pub name: String,

    /// Channel topic/description
    pub topic: Option<String>,

    /// User ID of the channel owner
    pub owner_id: i64,

    /// Channel creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Default for Channel {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            server_id: 0,
            name: String::new(),
            topic: None,
            owner_id: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Repository trait for Channel data access operations.
#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Find all channels belonging to any of the given servers, ordered by
    /// server id then channel id.
    async fn find_by_server_ids(&self, server_ids: &[i64]) -> Result<Vec<Channel>, AppError>;
}
