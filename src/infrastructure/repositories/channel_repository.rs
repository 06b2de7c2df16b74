//! Channel Repository Implementation
//!
//! PostgreSQL implementation of the ChannelRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Channel, ChannelRepository};
use crate::shared::error::AppError;

/// Database row representation matching the channels table schema.
#[derive(Debug, sqlx::FromRow)]
struct ChannelRow {
    id: i64,
    server_id: i64,
    name: String,
    topic: Option<String>,
    owner_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ChannelRow {
    fn into_channel(self) -> Channel {
        Channel {
            id: self.id,
            server_id: self.server_id,
            name: self.name,
            topic: self.topic,
            owner_id: self.owner_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// PostgreSQL channel repository implementation.
#[derive(Clone)]
pub struct PgChannelRepository {
    pool: PgPool,
}

impl PgChannelRepository {
    /// Create a new PgChannelRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChannelRepository for PgChannelRepository {
    /// Batch-fetch the channels of every listed server in one query.
    async fn find_by_server_ids(&self, server_ids: &[i64]) -> Result<Vec<Channel>, AppError> {
        if server_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, ChannelRow>(
            r#"
            SELECT id, server_id, name, topic, owner_id, created_at, updated_at
            FROM channels
            WHERE server_id = ANY($1)
            ORDER BY server_id, id
            "#,
        )
        .bind(server_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_channel()).collect())
    }
}
