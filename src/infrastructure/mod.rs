//! Infrastructure Layer
//!
//! Contains implementations for external services:
//! - Database repositories (PostgreSQL)
//! - Icon storage (local filesystem)

pub mod database;
pub mod repositories;
pub mod storage;
