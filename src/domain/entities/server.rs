//! Server entity and repository trait.
//!
//! Maps to the `servers` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Represents a server in the chat system.
///
/// A server is a community space containing channels and members.
///
/// Maps to the `servers` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - name: VARCHAR(100) NOT NULL
/// - owner_id: BIGINT NOT NULL REFERENCES users(id)
/// - category_id: BIGINT NOT NULL REFERENCES categories(id)
/// - description: TEXT NULL
/// - icon_url: TEXT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
///
/// Membership lives in the `server_members` join table and is never part of
/// the entity itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    /// Snowflake ID (primary key)
    pub id: i64,

    /// Server name (2-100 characters)
    pub name: String,

    /// User ID of the server owner
    pub owner_id: i64,

    /// Category this server belongs to
    pub category_id: i64,

    /// Server description
    pub description: Option<String>,

    /// URL to server icon image
    pub icon_url: Option<String>,

    /// Server creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Server {
    /// Check if a user is the owner of this server.
    pub fn is_owner(&self, user_id: i64) -> bool {
        self.owner_id == user_id
    }
}

impl Default for Server {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: String::new(),
            owner_id: 0,
            category_id: 0,
            description: None,
            icon_url: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Filter composed by the list operation and executed by the repository as a
/// single query. Fields mirror the recognized query options; `limit` is
/// applied after every other restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerQuery {
    /// Restrict to servers whose category name equals this value.
    pub category: Option<String>,

    /// Restrict to servers whose member set contains this user.
    pub member_user_id: Option<i64>,

    /// Restrict to the single server with this id.
    pub server_id: Option<i64>,

    /// Attach a live member count to each result row.
    pub with_num_members: bool,

    /// Truncate the final result sequence to the first N entries.
    pub limit: Option<i64>,
}

/// A server row produced by the list query: the entity, its resolved category
/// name, and the member-count annotation. `num_members` is transient query
/// output, set only when `ServerQuery::with_num_members` was requested.
#[derive(Debug, Clone)]
pub struct ServerRecord {
    pub server: Server,
    pub category_name: String,
    pub num_members: Option<i64>,
}

/// Repository trait for Server data access operations.
#[async_trait]
pub trait ServerRepository: Send + Sync {
    /// List servers matching the composed filter, with optional member-count
    /// annotation. Default ordering is by id ascending.
    async fn list(&self, query: &ServerQuery) -> Result<Vec<ServerRecord>, AppError>;

    /// Find a server by its Snowflake ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Server>, AppError>;

    /// Create a new server; the owner becomes the first member.
    async fn create(&self, server: &Server) -> Result<Server, AppError>;

    /// Update the icon URL of a server.
    async fn set_icon(&self, id: i64, icon_url: &str) -> Result<(), AppError>;
}
