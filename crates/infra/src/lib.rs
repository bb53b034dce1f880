//! Infrastructure layer: in-memory collaborators and configuration.
//!
//! Reference implementations of the storage, metadata and field seams
//! defined in `entitykit-core`, for tests and development.

pub mod backend;
pub mod config;
pub mod field_store;
pub mod info_registry;
pub mod storage;


pub use backend::InMemoryBackend;
pub use config::{ConfigError, ConfigWarning, EntityTypeConfig, EntityTypesConfig};
pub use field_store::InMemoryFieldStore;
pub use info_registry::InMemoryInfoRegistry;
pub use storage::{ControllerRegistry, IdStrategy, InMemoryStorageController};
