//! `entitykit-core` — the entity contract.
//!
//! Identity, novelty, lifecycle delegation and field access shared by every
//! entity kind. Storage, metadata and field values come from collaborators
//! passed in through [`EntityContext`]; this crate implements none of them.

pub mod base;
pub mod context;
pub mod entity;
pub mod error;
pub mod field;
pub mod id;
pub mod info;
pub mod property;
pub mod storage;

pub use base::BaseEntity;
pub use context::EntityContext;
pub use entity::{Entity, EntityRecord};
pub use error::{EntityError, EntityResult};
pub use field::{DEFAULT_VALUE_KEY, FieldItem, FieldProvider, FieldQuery, FieldValue, LanguageCode};
pub use id::EntityId;
pub use info::{EntityInfo, EntityInfoRegistry};
pub use property::{EntityProperties, EntityUri, IS_NEW_KEY, PropertyMap, UnknownKeyPolicy};
pub use storage::{ControllerResolver, SaveStatus, StorageController};
