//! Collaborators handed to entity operations.

use std::sync::Arc;

use crate::base::BaseEntity;
use crate::entity::EntityRecord;
use crate::error::{EntityError, EntityResult};
use crate::field::FieldProvider;
use crate::info::{EntityInfo, EntityInfoRegistry};
use crate::property::{EntityProperties, PropertyMap, UnknownKeyPolicy};
use crate::storage::{ControllerResolver, StorageController};

/// Explicit replacement for ambient controller/metadata/field lookups.
///
/// Cheap to clone; share one per request (or per process).
#[derive(Clone)]
pub struct EntityContext {
    controllers: Arc<dyn ControllerResolver>,
    info: Arc<dyn EntityInfoRegistry>,
    fields: Arc<dyn FieldProvider>,
}

impl core::fmt::Debug for EntityContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EntityContext")
            .field("entity_types", &self.info.entity_types())
            .finish()
    }
}

impl EntityContext {
    pub fn new(
        controllers: Arc<dyn ControllerResolver>,
        info: Arc<dyn EntityInfoRegistry>,
        fields: Arc<dyn FieldProvider>,
    ) -> Self {
        Self {
            controllers,
            info,
            fields,
        }
    }

    pub fn controller(&self, entity_type: &str) -> EntityResult<Arc<dyn StorageController>> {
        self.controllers.controller(entity_type)
    }

    pub fn entity_info(&self, entity_type: &str) -> EntityResult<EntityInfo> {
        self.info.entity_info(entity_type)
    }

    pub fn field_provider(&self) -> &dyn FieldProvider {
        self.fields.as_ref()
    }

    /// Construct an entity, checking the mapping against the type's metadata.
    ///
    /// Types with bundles must receive their bundle key, and the constructed
    /// entity must carry every property the metadata names (see
    /// [`EntityInfo::check_conforms`]). `BaseEntity::from_values` skips these checks.
    pub fn create<P: EntityProperties>(
        &self,
        values: PropertyMap,
        policy: UnknownKeyPolicy,
    ) -> EntityResult<BaseEntity<P>> {
        let info = self.entity_info(P::ENTITY_TYPE)?;
        if let Some(bundle_key) = &info.bundle_key {
            let present = values
                .get(bundle_key)
                .and_then(|v| v.as_str())
                .is_some_and(|s| !s.trim().is_empty());
            if !present {
                return Err(EntityError::malformed(format!(
                    "{}: missing bundle property `{bundle_key}`",
                    info.entity_type
                )));
            }
        }
        let entity = BaseEntity::<P>::from_values(values, policy)?;
        info.check_conforms(&entity.to_values()?, entity.uri().as_ref())?;
        Ok(entity)
    }
}
