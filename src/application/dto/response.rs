//! Response DTOs
//!
//! Wire representations for API response bodies.

use serde::Serialize;

use crate::application::services::{ChannelDto, ServerDto};

/// Channel representation. Every channel field is emitted unconditionally.
#[derive(Debug, Serialize)]
pub struct ChannelResponse {
    pub id: String,
    pub server_id: String,
    pub name: String,
    pub topic: Option<String>,
    pub owner_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ChannelDto> for ChannelResponse {
    fn from(dto: ChannelDto) -> Self {
        Self {
            id: dto.id,
            server_id: dto.server_id,
            name: dto.name,
            topic: dto.topic,
            owner_id: dto.owner_id,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

/// Server representation.
///
/// Emits every server field except the raw member set, with the fully
/// serialized channel collection nested under `channel_server`.
///
/// `num_members` is shaped by the caller's capability flag: the key is
/// omitted entirely unless the flag was set, and is `null` when the flag was
/// set but the query carried no annotation. The outer `Option` models key
/// presence, the inner one the annotation value.
#[derive(Debug, Serialize)]
pub struct ServerResponse {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub category_id: String,
    pub category: String,
    pub description: Option<String>,
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_members: Option<Option<i64>>,
    pub channel_server: Vec<ChannelResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl ServerResponse {
    /// Build the representation from a service DTO. `include_num_members` is
    /// the per-call capability flag controlling whether the `num_members`
    /// key appears at all.
    pub fn from_dto(dto: ServerDto, include_num_members: bool) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            owner_id: dto.owner_id,
            category_id: dto.category_id,
            category: dto.category,
            description: dto.description,
            icon_url: dto.icon_url,
            num_members: if include_num_members {
                Some(dto.num_members)
            } else {
                None
            },
            channel_server: dto.channels.into_iter().map(ChannelResponse::from).collect(),
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}
