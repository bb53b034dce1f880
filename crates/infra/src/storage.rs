//! In-memory storage controllers.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use serde::Deserialize;
use uuid::Uuid;

use entitykit_core::{
    BaseEntity, ControllerResolver, EntityError, EntityId, EntityProperties, EntityRecord,
    EntityResult, PropertyMap, SaveStatus, StorageController, UnknownKeyPolicy,
};

/// How identifiers are generated on insert.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// 1, 2, 3, ... (numeric ids).
    #[default]
    Serial,
    /// UUIDv7 strings.
    Uuid,
}

#[derive(Debug, Default)]
struct ControllerState {
    rows: BTreeMap<EntityId, PropertyMap>,
    last_id: u64,
    last_revision: u64,
    delete_calls: Vec<Vec<EntityId>>,
}

/// Stores entities of one type as property maps.
///
/// Intended for tests/dev. Every save of a revisioned type gets a fresh
/// revision id; pre-assigned ids are honoured for entities forced new.
#[derive(Debug)]
pub struct InMemoryStorageController {
    entity_type: String,
    id_strategy: IdStrategy,
    revisioned: bool,
    state: RwLock<ControllerState>,
}

impl InMemoryStorageController {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            id_strategy: IdStrategy::Serial,
            revisioned: false,
            state: RwLock::new(ControllerState::default()),
        }
    }

    pub fn with_id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.id_strategy = strategy;
        self
    }

    pub fn revisioned(mut self, revisioned: bool) -> Self {
        self.revisioned = revisioned;
        self
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// Stored property map for `id`.
    pub fn load(&self, id: &EntityId) -> EntityResult<Option<PropertyMap>> {
        let state = self
            .state
            .read()
            .map_err(|_| EntityError::storage("lock poisoned"))?;
        Ok(state.rows.get(id).cloned())
    }

    /// Load and rebuild a typed entity.
    pub fn load_entity<P: EntityProperties>(
        &self,
        id: &EntityId,
    ) -> EntityResult<Option<BaseEntity<P>>> {
        if P::ENTITY_TYPE != self.entity_type {
            return Err(EntityError::malformed(format!(
                "controller for {} cannot load {}",
                self.entity_type,
                P::ENTITY_TYPE
            )));
        }
        self.load(id)?
            .map(|values| BaseEntity::from_values(values, UnknownKeyPolicy::Reject))
            .transpose()
    }

    pub fn len(&self) -> EntityResult<usize> {
        let state = self
            .state
            .read()
            .map_err(|_| EntityError::storage("lock poisoned"))?;
        Ok(state.rows.len())
    }

    pub fn is_empty(&self) -> EntityResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Identifier lists passed to `delete`, in call order.
    pub fn delete_calls(&self) -> EntityResult<Vec<Vec<EntityId>>> {
        let state = self
            .state
            .read()
            .map_err(|_| EntityError::storage("lock poisoned"))?;
        Ok(state.delete_calls.clone())
    }

    fn next_id(&self, state: &mut ControllerState) -> EntityResult<EntityId> {
        match self.id_strategy {
            IdStrategy::Serial => {
                state.last_id = state
                    .last_id
                    .checked_add(1)
                    .ok_or_else(|| EntityError::storage("identifier space exhausted"))?;
                Ok(EntityId::Int(state.last_id))
            }
            IdStrategy::Uuid => Ok(EntityId::Str(Uuid::now_v7().to_string())),
        }
    }
}

impl StorageController for InMemoryStorageController {
    fn save(&self, entity: &mut dyn EntityRecord) -> EntityResult<SaveStatus> {
        if entity.entity_type() != self.entity_type {
            return Err(EntityError::malformed(format!(
                "controller for {} cannot save {}",
                self.entity_type,
                entity.entity_type()
            )));
        }

        let mut state = self
            .state
            .write()
            .map_err(|_| EntityError::storage("lock poisoned"))?;

        let status = if entity.is_new() {
            let id = match entity.id() {
                Some(id) => {
                    if state.rows.contains_key(&id) {
                        return Err(EntityError::storage(format!(
                            "{} {id} already exists",
                            self.entity_type
                        )));
                    }
                    if let EntityId::Int(n) = id {
                        state.last_id = state.last_id.max(n);
                    }
                    id
                }
                None => self.next_id(&mut state)?,
            };
            entity.assign_id(id);
            SaveStatus::Inserted
        } else {
            let exists = entity
                .id()
                .is_some_and(|id| state.rows.contains_key(&id));
            if !exists {
                return Err(EntityError::storage(format!(
                    "{} {:?} does not exist",
                    self.entity_type,
                    entity.id()
                )));
            }
            SaveStatus::Updated
        };

        if self.revisioned {
            state.last_revision += 1;
            entity.assign_revision_id(EntityId::Int(state.last_revision));
        }
        entity.enforce_is_new(false);

        let id = entity
            .id()
            .ok_or_else(|| EntityError::malformed("entity lost its identifier during save"))?;
        let values = entity.to_values()?;
        state.rows.insert(id.clone(), values);

        tracing::debug!(entity_type = %self.entity_type, %id, ?status, "stored entity");
        Ok(status)
    }

    fn delete(&self, ids: &[EntityId]) -> EntityResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|_| EntityError::storage("lock poisoned"))?;
        state.delete_calls.push(ids.to_vec());
        for id in ids {
            state.rows.remove(id);
        }
        Ok(())
    }
}

/// Entity type to controller.
#[derive(Default)]
pub struct ControllerRegistry {
    controllers: HashMap<String, Arc<dyn StorageController>>,
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        entity_type: impl Into<String>,
        controller: Arc<dyn StorageController>,
    ) -> &mut Self {
        self.controllers.insert(entity_type.into(), controller);
        self
    }

    pub fn entity_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.controllers.keys().cloned().collect();
        types.sort();
        types
    }
}

impl ControllerResolver for ControllerRegistry {
    fn controller(&self, entity_type: &str) -> EntityResult<Arc<dyn StorageController>> {
        self.controllers
            .get(entity_type)
            .cloned()
            .ok_or_else(|| EntityError::unknown_entity_type(entity_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entitykit_content::{Node, NodeProperties, User, UserProperties};

    #[test]
    fn insert_assigns_serial_ids() {
        let controller = InMemoryStorageController::new("user");
        let mut first = User::new(UserProperties::new("ada"));
        let mut second = User::new(UserProperties::new("grace"));

        assert_eq!(controller.save(&mut first).unwrap(), SaveStatus::Inserted);
        assert_eq!(controller.save(&mut second).unwrap(), SaveStatus::Inserted);
        assert_eq!(first.id(), Some(EntityId::Int(1)));
        assert_eq!(second.id(), Some(EntityId::Int(2)));
        assert_eq!(controller.len().unwrap(), 2);
    }

    #[test]
    fn uuid_strategy_assigns_string_ids() {
        let controller = InMemoryStorageController::new("user").with_id_strategy(IdStrategy::Uuid);
        let mut user = User::new(UserProperties::new("ada"));
        controller.save(&mut user).unwrap();
        let id = user.id().unwrap();
        assert!(Uuid::parse_str(id.as_str().unwrap()).is_ok());
    }

    #[test]
    fn revisioned_types_get_a_revision_per_save() {
        let controller = InMemoryStorageController::new("node").revisioned(true);
        let mut node = Node::new(NodeProperties::new("article", "Hello"));

        controller.save(&mut node).unwrap();
        assert_eq!(node.revision_id(), Some(EntityId::Int(1)));
        node.properties_mut().title = "Hello again".to_string();
        assert_eq!(controller.save(&mut node).unwrap(), SaveStatus::Updated);
        assert_eq!(node.revision_id(), Some(EntityId::Int(2)));

        let stored: Node = controller.load_entity(&EntityId::Int(1)).unwrap().unwrap();
        assert_eq!(stored.properties().title, "Hello again");
        assert_eq!(stored.revision_id(), Some(EntityId::Int(2)));
    }

    #[test]
    fn forced_new_entity_keeps_preassigned_id() {
        let controller = InMemoryStorageController::new("user");
        let mut imported = User::new(UserProperties {
            uid: Some(EntityId::Int(40)),
            ..UserProperties::new("legacy")
        });
        imported.enforce_is_new(true);

        assert_eq!(controller.save(&mut imported).unwrap(), SaveStatus::Inserted);
        assert_eq!(imported.id(), Some(EntityId::Int(40)));
        assert!(!imported.is_new());

        let mut next = User::new(UserProperties::new("fresh"));
        controller.save(&mut next).unwrap();
        assert_eq!(next.id(), Some(EntityId::Int(41)));

        let mut clash = User::new(UserProperties {
            uid: Some(EntityId::Int(40)),
            ..UserProperties::new("clash")
        });
        clash.enforce_is_new(true);
        assert!(controller.save(&mut clash).unwrap_err().is_storage());
    }

    #[test]
    fn exhausted_serial_ids_fail_without_poisoning() {
        let controller = InMemoryStorageController::new("user");
        let mut last = User::new(UserProperties {
            uid: Some(EntityId::Int(u64::MAX)),
            ..UserProperties::new("last")
        });
        last.enforce_is_new(true);
        assert_eq!(controller.save(&mut last).unwrap(), SaveStatus::Inserted);

        let mut fresh = User::new(UserProperties::new("fresh"));
        assert_eq!(
            controller.save(&mut fresh).unwrap_err(),
            EntityError::Storage("identifier space exhausted".to_string())
        );
        assert_eq!(fresh.id(), None);
        assert!(fresh.is_new());

        assert_eq!(controller.len().unwrap(), 1);
        assert!(controller.load(&EntityId::Int(u64::MAX)).unwrap().is_some());
        controller.delete(&[EntityId::Int(u64::MAX)]).unwrap();
        assert!(controller.is_empty().unwrap());
    }

    #[test]
    fn updating_a_missing_row_fails() {
        let controller = InMemoryStorageController::new("user");
        let mut ghost = User::new(UserProperties {
            uid: Some(EntityId::Int(3)),
            ..UserProperties::new("ghost")
        });
        assert!(controller.save(&mut ghost).unwrap_err().is_storage());
    }

    #[test]
    fn rejects_foreign_entity_types() {
        let controller = InMemoryStorageController::new("user");
        let mut node = Node::new(NodeProperties::new("page", "x"));
        assert!(matches!(controller.save(&mut node), Err(EntityError::Malformed(_))));
        assert!(matches!(
            controller.load_entity::<NodeProperties>(&EntityId::Int(1)),
            Err(EntityError::Malformed(_))
        ));
    }

    #[test]
    fn delete_records_calls_and_removes_rows() {
        let controller = InMemoryStorageController::new("user");
        let mut user = User::new(UserProperties::new("ada"));
        controller.save(&mut user).unwrap();

        controller.delete(&[EntityId::Int(1), EntityId::Int(99)]).unwrap();
        assert!(controller.is_empty().unwrap());
        assert_eq!(
            controller.delete_calls().unwrap(),
            vec![vec![EntityId::Int(1), EntityId::Int(99)]]
        );
    }

    #[test]
    fn registry_resolves_by_type() {
        let mut registry = ControllerRegistry::new();
        registry.register("user", Arc::new(InMemoryStorageController::new("user")));
        assert!(registry.controller("user").is_ok());
        assert!(matches!(
            registry.controller("node"),
            Err(EntityError::UnknownEntityType(_))
        ));
        assert_eq!(registry.entity_types(), vec!["user".to_string()]);
    }
}
