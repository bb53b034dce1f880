//! In-memory entity-metadata registry.

use std::collections::BTreeMap;

use entitykit_core::{EntityError, EntityInfo, EntityInfoRegistry, EntityResult};

/// Metadata for a fixed set of entity types.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInfoRegistry {
    infos: BTreeMap<String, EntityInfo>,
}

impl InMemoryInfoRegistry {
    /// Build from metadata entries. Each entry is validated; a type may only
    /// be registered once.
    pub fn new(infos: impl IntoIterator<Item = EntityInfo>) -> EntityResult<Self> {
        let mut registry = Self::default();
        for info in infos {
            registry.register(info)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, info: EntityInfo) -> EntityResult<()> {
        info.validate()?;
        if self.infos.contains_key(&info.entity_type) {
            return Err(EntityError::malformed(format!(
                "entity type {} registered twice",
                info.entity_type
            )));
        }
        self.infos.insert(info.entity_type.clone(), info);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityInfo> {
        self.infos.values()
    }
}

impl EntityInfoRegistry for InMemoryInfoRegistry {
    fn entity_info(&self, entity_type: &str) -> EntityResult<EntityInfo> {
        self.infos
            .get(entity_type)
            .cloned()
            .ok_or_else(|| EntityError::unknown_entity_type(entity_type))
    }

    fn entity_types(&self) -> Vec<String> {
        self.infos.keys().cloned().collect()
    }
}
