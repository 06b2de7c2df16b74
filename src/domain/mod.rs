//! # Domain Layer
//!
//! The domain layer contains the core business objects of the chat backend.
//! It is independent of any external frameworks or infrastructure concerns.
//!
//! - **entities**: Core domain entities (Server, Channel, Category)
//! - **storage**: Contract for persisted upload content
//!
//! Repository traits define data access contracts; implementations live in
//! the infrastructure layer.

pub mod entities;
pub mod storage;

// Re-export commonly used types
pub use entities::*;
pub use storage::IconStorage;
