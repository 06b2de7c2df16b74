//! # Domain Entities
//!
//! Core domain entities representing the main business objects in the chat
//! backend. All entities map directly to their corresponding database tables.
//!
//! - **Server**: a community that contains channels and members
//! - **Channel**: a communication space within a server
//! - **Category**: a label servers are grouped and filtered by
//!
//! Each entity has an associated repository trait defining data access
//! operations. These traits are implemented in the infrastructure layer,
//! following the dependency inversion principle.

mod category;
mod channel;
mod server;

pub use category::{Category, CategoryRepository};
pub use channel::{Channel, ChannelRepository};
pub use server::{Server, ServerQuery, ServerRecord, ServerRepository};
