//! Content entity kinds.
//!
//! A closed set of entity types built on [`entitykit_core::BaseEntity`]: each
//! kind is a property structure plus the metadata describing it.

pub mod metadata;
pub mod node;
pub mod taxonomy;
pub mod user;

pub use metadata::{all_entity_info, node_info, term_info, user_info};
pub use node::{Node, NodeProperties};
pub use taxonomy::{Term, TermProperties};
pub use user::{User, UserProperties};
