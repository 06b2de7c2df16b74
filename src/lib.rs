//! # Chat Backend Library
//!
//! This crate provides a chat-server backend slice with:
//! - A filtered server list endpoint (category, membership, id, count
//!   annotation, truncation)
//! - Server creation and icon uploads with pre-persistence validation
//! - PostgreSQL for persistent storage
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core business entities and repository traits
//! - **Application Layer**: Business logic services and DTOs
//! - **Infrastructure Layer**: Database and storage implementations
//! - **Presentation Layer**: HTTP handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! chat_backend/
//! +-- config/         Configuration management
//! +-- domain/         Domain entities and traits
//! +-- application/    Application services and DTOs
//! +-- infrastructure/ Database and storage implementations
//! +-- presentation/   HTTP routes, handlers, middleware
//! +-- shared/         Common utilities (errors, validators, snowflake IDs)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
