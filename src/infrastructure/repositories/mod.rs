//! Repository Implementations
//!
//! PostgreSQL implementations of the domain repository traits.
//!
//! - **PgServerRepository** - server listing/creation and icon updates
//! - **PgChannelRepository** - channel lookups for nested serialization
//! - **PgCategoryRepository** - category lookups for create validation

pub mod category_repository;
pub mod channel_repository;
pub mod server_repository;

pub use category_repository::PgCategoryRepository;
pub use channel_repository::PgChannelRepository;
pub use server_repository::PgServerRepository;
