//! Server Service
//!
//! Server listing (filter orchestration), creation, and icon updates.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{
    Channel, ChannelRepository, CategoryRepository, IconStorage, Server, ServerQuery,
    ServerRecord, ServerRepository,
};
use crate::shared::snowflake::SnowflakeGenerator;
use crate::shared::validation::{
    validate_icon_image_size, validate_image_file_extension, UploadValidationError,
};

/// Server service trait
#[async_trait]
pub trait ServerService: Send + Sync {
    /// List servers matching the given filter options. `user_id` is the
    /// authenticated caller, if any; it is only required when `by_user` is
    /// requested.
    async fn list_servers(
        &self,
        options: ServerListDto,
        user_id: Option<i64>,
    ) -> Result<Vec<ServerDto>, ServerError>;

    /// Create a new server owned by `owner_id`.
    async fn create_server(
        &self,
        owner_id: i64,
        request: CreateServerDto,
    ) -> Result<ServerDto, ServerError>;

    /// Validate and store a new icon for a server. Owner only.
    async fn update_icon(
        &self,
        server_id: i64,
        actor_id: i64,
        upload: IconUploadDto,
    ) -> Result<ServerDto, ServerError>;
}

/// Recognized list options, each independently optional.
///
/// Boolean options follow the wire convention of the API: the literal string
/// `"true"` enables them, anything else counts as false. `qty` and
/// `by_serverid` arrive as raw strings and are parsed here so that malformed
/// values surface as validation errors.
#[derive(Debug, Clone, Default)]
pub struct ServerListDto {
    pub category: Option<String>,
    pub qty: Option<String>,
    pub by_user: bool,
    pub by_serverid: Option<String>,
    pub with_num_members: bool,
}

/// Create server request
#[derive(Debug, Clone)]
pub struct CreateServerDto {
    pub name: String,
    pub category_id: i64,
    pub description: Option<String>,
}

/// An uploaded icon: original file name plus in-memory content.
#[derive(Debug, Clone)]
pub struct IconUploadDto {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Server data transfer object
#[derive(Debug, Clone)]
pub struct ServerDto {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub category_id: String,
    pub category: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    /// Member-count annotation; set only when the caller asked for it.
    pub num_members: Option<i64>,
    pub channels: Vec<ChannelDto>,
    pub created_at: String,
    pub updated_at: String,
}

impl ServerDto {
    pub fn from_record(record: ServerRecord, channels: Vec<ChannelDto>) -> Self {
        let ServerRecord {
            server,
            category_name,
            num_members,
        } = record;
        Self {
            id: server.id.to_string(),
            name: server.name,
            owner_id: server.owner_id.to_string(),
            category_id: server.category_id.to_string(),
            category: category_name,
            description: server.description,
            icon_url: server.icon_url,
            num_members,
            channels,
            created_at: server.created_at.to_rfc3339(),
            updated_at: server.updated_at.to_rfc3339(),
        }
    }
}

/// Channel data transfer object
#[derive(Debug, Clone)]
pub struct ChannelDto {
    pub id: String,
    pub server_id: String,
    pub name: String,
    pub topic: Option<String>,
    pub owner_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Channel> for ChannelDto {
    fn from(channel: Channel) -> Self {
        Self {
            id: channel.id.to_string(),
            server_id: channel.server_id.to_string(),
            name: channel.name,
            topic: channel.topic,
            owner_id: channel.owner_id.to_string(),
            created_at: channel.created_at.to_rfc3339(),
            updated_at: channel.updated_at.to_rfc3339(),
        }
    }
}

/// Server service errors
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("You must be authenticated to use this feature.")]
    Unauthenticated,

    #[error("Invalid server id.")]
    InvalidServerId,

    #[error("Server with id {0} not found.")]
    ServerNotFound(String),

    #[error("Invalid qty value.")]
    InvalidQuantity,

    #[error("Category with id {0} not found.")]
    CategoryNotFound(i64),

    #[error("Server not found")]
    NotFound,

    #[error("Permission denied")]
    Forbidden,

    #[error(transparent)]
    InvalidUpload(#[from] UploadValidationError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// ServerService implementation
pub struct ServerServiceImpl<S, C, G, F>
where
    S: ServerRepository,
    C: ChannelRepository,
    G: CategoryRepository,
    F: IconStorage,
{
    server_repo: Arc<S>,
    channel_repo: Arc<C>,
    category_repo: Arc<G>,
    icon_storage: Arc<F>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<S, C, G, F> ServerServiceImpl<S, C, G, F>
where
    S: ServerRepository,
    C: ChannelRepository,
    G: CategoryRepository,
    F: IconStorage,
{
    pub fn new(
        server_repo: Arc<S>,
        channel_repo: Arc<C>,
        category_repo: Arc<G>,
        icon_storage: Arc<F>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            server_repo,
            channel_repo,
            category_repo,
            icon_storage,
            id_generator,
        }
    }

    /// Serialize the annotated records together with their fully-loaded
    /// channel collections.
    async fn assemble(&self, records: Vec<ServerRecord>) -> Result<Vec<ServerDto>, ServerError> {
        let ids: Vec<i64> = records.iter().map(|r| r.server.id).collect();
        let channels = self
            .channel_repo
            .find_by_server_ids(&ids)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        let mut grouped: HashMap<i64, Vec<ChannelDto>> = HashMap::new();
        for channel in channels {
            grouped
                .entry(channel.server_id)
                .or_default()
                .push(ChannelDto::from(channel));
        }

        Ok(records
            .into_iter()
            .map(|record| {
                let channels = grouped.remove(&record.server.id).unwrap_or_default();
                ServerDto::from_record(record, channels)
            })
            .collect())
    }
}

#[async_trait]
impl<S, C, G, F> ServerService for ServerServiceImpl<S, C, G, F>
where
    S: ServerRepository + 'static,
    C: ChannelRepository + 'static,
    G: CategoryRepository + 'static,
    F: IconStorage + 'static,
{
    async fn list_servers(
        &self,
        options: ServerListDto,
        user_id: Option<i64>,
    ) -> Result<Vec<ServerDto>, ServerError> {
        // Filters compose in a fixed order; later steps narrow the set
        // produced by earlier ones and truncation comes last.
        let mut query = ServerQuery::default();

        // 1. Category equality filter.
        query.category = options.category;

        // 2. Membership filter; requires an authenticated caller.
        if options.by_user {
            let user_id = user_id.ok_or(ServerError::Unauthenticated)?;
            query.member_user_id = Some(user_id);
        }

        // 3. Member-count annotation.
        query.with_num_members = options.with_num_members;

        // 4. Single-server filter; the id must parse as a snowflake.
        if let Some(raw) = options.by_serverid.as_deref() {
            let id: i64 = raw.parse().map_err(|_| ServerError::InvalidServerId)?;
            query.server_id = Some(id);
        }

        // 5. Truncation, applied to the final filtered/annotated set.
        if let Some(raw) = options.qty.as_deref() {
            let qty: i64 = raw.parse().map_err(|_| ServerError::InvalidQuantity)?;
            if qty < 0 {
                return Err(ServerError::InvalidQuantity);
            }
            query.limit = Some(qty);
        }

        // An explicit id that matches nothing in the narrowed set is a
        // validation failure, not an empty result. The existence decision
        // must precede truncation (qty=0 on an existing id is an empty
        // result, not a missing server), so with an id the query runs
        // unlimited (the set holds at most one row) and truncation is
        // applied afterwards.
        let records = if let Some(id) = query.server_id {
            let limit = query.limit.take();
            let mut records = self
                .server_repo
                .list(&query)
                .await
                .map_err(|e| ServerError::Internal(e.to_string()))?;
            if records.is_empty() {
                return Err(ServerError::ServerNotFound(id.to_string()));
            }
            if let Some(limit) = limit {
                records.truncate(limit as usize);
            }
            records
        } else {
            self.server_repo
                .list(&query)
                .await
                .map_err(|e| ServerError::Internal(e.to_string()))?
        };

        self.assemble(records).await
    }

    async fn create_server(
        &self,
        owner_id: i64,
        request: CreateServerDto,
    ) -> Result<ServerDto, ServerError> {
        let category = self
            .category_repo
            .find_by_id(request.category_id)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?
            .ok_or(ServerError::CategoryNotFound(request.category_id))?;

        let now = Utc::now();
        let server = Server {
            id: self.id_generator.generate(),
            name: request.name,
            owner_id,
            category_id: category.id,
            description: request.description,
            icon_url: None,
            created_at: now,
            updated_at: now,
        };

        let created = self
            .server_repo
            .create(&server)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        let record = ServerRecord {
            server: created,
            category_name: category.name,
            num_members: None,
        };

        Ok(ServerDto::from_record(record, Vec::new()))
    }

    async fn update_icon(
        &self,
        server_id: i64,
        actor_id: i64,
        upload: IconUploadDto,
    ) -> Result<ServerDto, ServerError> {
        let mut server = self
            .server_repo
            .find_by_id(server_id)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?
            .ok_or(ServerError::NotFound)?;

        if !server.is_owner(actor_id) {
            return Err(ServerError::Forbidden);
        }

        // Both upload validators run before anything is persisted.
        validate_image_file_extension(&upload.file_name)?;
        validate_icon_image_size(Some(&upload.data))?;

        let extension = Path::new(&upload.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .ok_or(UploadValidationError::UnsupportedExtension)?;

        let file_name = format!("{}.{}", server.id, extension);
        let icon_url = self
            .icon_storage
            .store_icon(&file_name, &upload.data)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        self.server_repo
            .set_icon(server.id, &icon_url)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        server.icon_url = Some(icon_url);

        let category = self
            .category_repo
            .find_by_id(server.category_id)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?
            .ok_or_else(|| ServerError::Internal("Server category missing".into()))?;

        let record = ServerRecord {
            server,
            category_name: category.name,
            num_members: None,
        };

        let mut dtos = self.assemble(vec![record]).await?;
        Ok(dtos.remove(0))
    }
}
