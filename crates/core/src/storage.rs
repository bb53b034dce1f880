//! Storage controller seam.
//!
//! The entity core never persists anything itself. `save`/`delete` resolve
//! the controller for the entity type and hand the work over.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::entity::EntityRecord;
use crate::error::EntityResult;
use crate::id::EntityId;

/// Outcome of a successful save.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveStatus {
    Inserted,
    Updated,
}

/// Persists and removes entities of one type.
pub trait StorageController: Send + Sync {
    /// Persist `entity`.
    ///
    /// On first insert the controller assigns the identifier (and revision
    /// identifier, if any) through [`EntityRecord::assign_id`].
    fn save(&self, entity: &mut dyn EntityRecord) -> EntityResult<SaveStatus>;

    /// Remove the entities with the given identifiers.
    fn delete(&self, ids: &[EntityId]) -> EntityResult<()>;
}

impl<S> StorageController for Arc<S>
where
    S: StorageController + ?Sized,
{
    fn save(&self, entity: &mut dyn EntityRecord) -> EntityResult<SaveStatus> {
        (**self).save(entity)
    }

    fn delete(&self, ids: &[EntityId]) -> EntityResult<()> {
        (**self).delete(ids)
    }
}

/// Resolves the storage controller responsible for an entity type.
pub trait ControllerResolver: Send + Sync {
    /// Controller for `entity_type`, or `UnknownEntityType`.
    fn controller(&self, entity_type: &str) -> EntityResult<Arc<dyn StorageController>>;
}
