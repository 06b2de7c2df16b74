//! Server Handlers

use std::sync::Arc;

use axum::{
    extract::{Extension, Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::application::dto::request::{CreateServerRequest, ServerListParams};
use crate::application::dto::response::ServerResponse;
use crate::application::services::{
    CreateServerDto, IconUploadDto, ServerError, ServerListDto, ServerService, ServerServiceImpl,
};
use crate::infrastructure::repositories::{
    PgCategoryRepository, PgChannelRepository, PgServerRepository,
};
use crate::infrastructure::storage::LocalIconStorage;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

type Service = ServerServiceImpl<
    PgServerRepository,
    PgChannelRepository,
    PgCategoryRepository,
    LocalIconStorage,
>;

fn server_service(state: &AppState) -> Service {
    let server_repo = Arc::new(PgServerRepository::new(state.db.clone()));
    let channel_repo = Arc::new(PgChannelRepository::new(state.db.clone()));
    let category_repo = Arc::new(PgCategoryRepository::new(state.db.clone()));
    let icon_storage = Arc::new(LocalIconStorage::new(state.settings.upload.dir.clone()));

    ServerServiceImpl::new(
        server_repo,
        channel_repo,
        category_repo,
        icon_storage,
        state.snowflake.clone(),
    )
}

fn map_server_error(e: ServerError) -> AppError {
    match e {
        ServerError::Unauthenticated => AppError::Unauthorized(e.to_string()),
        ServerError::InvalidServerId
        | ServerError::ServerNotFound(_)
        | ServerError::InvalidQuantity
        | ServerError::CategoryNotFound(_)
        | ServerError::InvalidUpload(_) => AppError::Validation(e.to_string()),
        ServerError::NotFound => AppError::NotFound("Server not found".into()),
        ServerError::Forbidden => AppError::Forbidden("Permission denied".into()),
        ServerError::Internal(msg) => AppError::Internal(msg),
    }
}

/// List servers filtered by the recognized query options.
///
/// The `with_num_members` flag doubles as the serializer context deciding
/// whether the `num_members` key appears in the output records.
pub async fn list_servers(
    State(state): State<AppState>,
    auth: Option<Extension<AuthUser>>,
    Query(params): Query<ServerListParams>,
) -> Result<Json<Vec<ServerResponse>>, AppError> {
    let with_num_members = params.with_num_members();

    let options = ServerListDto {
        by_user: params.by_user(),
        with_num_members,
        category: params.category,
        qty: params.qty,
        by_serverid: params.by_serverid,
    };

    let user_id = auth.map(|Extension(user)| user.user_id);

    let servers = server_service(&state)
        .list_servers(options, user_id)
        .await
        .map_err(map_server_error)?;

    let responses: Vec<ServerResponse> = servers
        .into_iter()
        .map(|dto| ServerResponse::from_dto(dto, with_num_members))
        .collect();

    Ok(Json(responses))
}

/// Create a new server
pub async fn create_server(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<CreateServerRequest>,
) -> Result<(StatusCode, Json<ServerResponse>), AppError> {
    // Validate request
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category_id: i64 = body
        .category_id
        .parse()
        .map_err(|_| AppError::Validation("Invalid category id.".into()))?;

    let request = CreateServerDto {
        name: body.name,
        category_id,
        description: body.description,
    };

    let server = server_service(&state)
        .create_server(auth.user_id, request)
        .await
        .map_err(map_server_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ServerResponse::from_dto(server, false)),
    ))
}

/// Upload a new server icon (owner only)
///
/// Expects a multipart body with an `icon` file field. The upload is
/// validated (extension, pixel dimensions) before anything is stored.
pub async fn upload_server_icon(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(server_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ServerResponse>, AppError> {
    let server_id: i64 = server_id
        .parse()
        .map_err(|_| AppError::Validation("Invalid server id.".into()))?;

    let mut upload: Option<IconUploadDto> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() == Some("icon") {
            let file_name = field
                .file_name()
                .ok_or_else(|| AppError::BadRequest("Missing icon file name".into()))?
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read icon field: {}", e)))?;

            upload = Some(IconUploadDto {
                file_name,
                data: data.to_vec(),
            });
        }
    }

    let upload = upload.ok_or_else(|| AppError::BadRequest("Missing icon field".into()))?;

    let server = server_service(&state)
        .update_icon(server_id, auth.user_id, upload)
        .await
        .map_err(map_server_error)?;

    Ok(Json(ServerResponse::from_dto(server, false)))
}
