//! Server Repository Implementation
//!
//! PostgreSQL implementation of the ServerRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Server, ServerQuery, ServerRecord, ServerRepository};
use crate::shared::error::AppError;

/// Database row representation matching the servers table schema.
#[derive(Debug, sqlx::FromRow)]
struct ServerRow {
    id: i64,
    name: String,
    owner_id: i64,
    category_id: i64,
    description: Option<String>,
    icon_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ServerRow {
    fn into_server(self) -> Server {
        Server {
            id: self.id,
            name: self.name,
            owner_id: self.owner_id,
            category_id: self.category_id,
            description: self.description,
            icon_url: self.icon_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Row produced by the composed list query: server columns joined with the
/// category name plus the conditional member-count annotation.
#[derive(Debug, sqlx::FromRow)]
struct ServerListRow {
    id: i64,
    name: String,
    owner_id: i64,
    category_id: i64,
    category_name: String,
    description: Option<String>,
    icon_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    num_members: Option<i64>,
}

impl ServerListRow {
    fn into_record(self) -> ServerRecord {
        ServerRecord {
            server: Server {
                id: self.id,
                name: self.name,
                owner_id: self.owner_id,
                category_id: self.category_id,
                description: self.description,
                icon_url: self.icon_url,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            category_name: self.category_name,
            num_members: self.num_members,
        }
    }
}

/// PostgreSQL server repository implementation.
#[derive(Clone)]
pub struct PgServerRepository {
    pool: PgPool,
}

impl PgServerRepository {
    /// Create a new PgServerRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServerRepository for PgServerRepository {
    /// Execute the composed list filter as a single statement. The optional
    /// restrictions collapse into the WHERE clause, the member-count
    /// annotation is computed only when requested, and LIMIT applies to the
    /// final narrowed set (LIMIT NULL means no truncation).
    async fn list(&self, query: &ServerQuery) -> Result<Vec<ServerRecord>, AppError> {
        let rows = sqlx::query_as::<_, ServerListRow>(
            r#"
            SELECT s.id, s.name, s.owner_id, s.category_id,
                   c.name AS category_name,
                   s.description, s.icon_url, s.created_at, s.updated_at,
                   CASE WHEN $4 THEN (
                       SELECT COUNT(*) FROM server_members m WHERE m.server_id = s.id
                   ) END AS num_members
            FROM servers s
            INNER JOIN categories c ON c.id = s.category_id
            WHERE ($1::varchar IS NULL OR c.name = $1)
              AND ($2::bigint IS NULL OR EXISTS (
                       SELECT 1 FROM server_members m
                       WHERE m.server_id = s.id AND m.user_id = $2
                   ))
              AND ($3::bigint IS NULL OR s.id = $3)
            ORDER BY s.id
            LIMIT $5
            "#,
        )
        .bind(&query.category)
        .bind(query.member_user_id)
        .bind(query.server_id)
        .bind(query.with_num_members)
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_record()).collect())
    }

    /// Find a server by its ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Server>, AppError> {
        let row = sqlx::query_as::<_, ServerRow>(
            r#"
            SELECT id, name, owner_id, category_id, description, icon_url,
                   created_at, updated_at
            FROM servers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_server()))
    }

    /// Create a new server; the owner joins as the first member.
    async fn create(&self, server: &Server) -> Result<Server, AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ServerRow>(
            r#"
            INSERT INTO servers (id, name, owner_id, category_id, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, owner_id, category_id, description, icon_url,
                      created_at, updated_at
            "#,
        )
        .bind(server.id)
        .bind(&server.name)
        .bind(server.owner_id)
        .bind(server.category_id)
        .bind(&server.description)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO server_members (server_id, user_id, joined_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (server_id, user_id) DO NOTHING
            "#,
        )
        .bind(server.id)
        .bind(server.owner_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into_server())
    }

    /// Update the icon URL of a server.
    async fn set_icon(&self, id: i64, icon_url: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE servers
            SET icon_url = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(icon_url)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Server with id {} not found", id)));
        }

        Ok(())
    }
}
