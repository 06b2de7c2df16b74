//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! - **ServerService**: server listing (filter orchestration), creation,
//!   and icon updates

pub mod server_service;

pub use server_service::{
    ChannelDto, CreateServerDto, IconUploadDto, ServerDto, ServerError, ServerListDto,
    ServerService, ServerServiceImpl,
};
