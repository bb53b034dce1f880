//! Wiring of the in-memory collaborators into an [`EntityContext`].

use std::collections::BTreeMap;
use std::sync::Arc;

use entitykit_core::{EntityContext, EntityError, EntityInfo, EntityResult};

use crate::config::{ConfigError, EntityTypesConfig};
use crate::field_store::InMemoryFieldStore;
use crate::info_registry::InMemoryInfoRegistry;
use crate::storage::{ControllerRegistry, IdStrategy, InMemoryStorageController};

/// One in-memory controller per registered type, a metadata registry and a
/// field store. Keeps typed handles so tests can inspect storage.
pub struct InMemoryBackend {
    controllers: BTreeMap<String, Arc<InMemoryStorageController>>,
    info: Arc<InMemoryInfoRegistry>,
    fields: Arc<InMemoryFieldStore>,
    context: EntityContext,
}

impl InMemoryBackend {
    /// Serial ids for every type.
    pub fn new(infos: impl IntoIterator<Item = EntityInfo>) -> EntityResult<Self> {
        let infos: Vec<EntityInfo> = infos.into_iter().collect();
        let strategies = infos
            .iter()
            .map(|i| (i.entity_type.clone(), IdStrategy::Serial))
            .collect();
        Self::build(infos, strategies)
    }

    pub fn from_config(config: &EntityTypesConfig) -> Result<Self, ConfigError> {
        let infos = config.entity_info()?;
        let strategies = config
            .entity_types
            .iter()
            .map(|(name, cfg)| (name.clone(), cfg.id_strategy))
            .collect();
        Ok(Self::build(infos, strategies)?)
    }

    fn build(
        infos: Vec<EntityInfo>,
        strategies: BTreeMap<String, IdStrategy>,
    ) -> EntityResult<Self> {
        let info = Arc::new(InMemoryInfoRegistry::new(infos)?);
        let fields = Arc::new(InMemoryFieldStore::new());

        let mut registry = ControllerRegistry::new();
        let mut controllers = BTreeMap::new();
        for entity in info.iter() {
            let strategy = strategies
                .get(&entity.entity_type)
                .copied()
                .unwrap_or_default();
            let controller = Arc::new(
                InMemoryStorageController::new(entity.entity_type.clone())
                    .with_id_strategy(strategy)
                    .revisioned(entity.is_revisionable()),
            );
            registry.register(entity.entity_type.clone(), controller.clone());
            controllers.insert(entity.entity_type.clone(), controller);
        }

        let context = EntityContext::new(Arc::new(registry), info.clone(), fields.clone());
        tracing::debug!(entity_types = ?info.iter().map(|i| &i.entity_type).collect::<Vec<_>>(), "in-memory backend ready");

        Ok(Self {
            controllers,
            info,
            fields,
            context,
        })
    }

    pub fn context(&self) -> &EntityContext {
        &self.context
    }

    pub fn controller(&self, entity_type: &str) -> EntityResult<Arc<InMemoryStorageController>> {
        self.controllers
            .get(entity_type)
            .cloned()
            .ok_or_else(|| EntityError::unknown_entity_type(entity_type))
    }

    pub fn info(&self) -> &InMemoryInfoRegistry {
        &self.info
    }

    pub fn fields(&self) -> &InMemoryFieldStore {
        &self.fields
    }
}
