//! In-memory field-value provider.

use std::collections::HashMap;
use std::sync::RwLock;

use entitykit_core::{
    EntityError, EntityId, EntityRecord, EntityResult, FieldItem, FieldProvider, LanguageCode,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FieldKey {
    entity_type: String,
    id: EntityId,
    field_name: String,
    language: Option<LanguageCode>,
}

/// Field items keyed by entity, field name and language.
///
/// Entities without an identifier have no stored fields.
#[derive(Debug, Default)]
pub struct InMemoryFieldStore {
    items: RwLock<HashMap<FieldKey, Vec<FieldItem>>>,
}

impl InMemoryFieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the items of one field.
    pub fn set_items(
        &self,
        entity_type: &str,
        id: EntityId,
        field_name: &str,
        language: Option<LanguageCode>,
        items: Vec<FieldItem>,
    ) -> EntityResult<()> {
        let key = FieldKey {
            entity_type: entity_type.to_string(),
            id,
            field_name: field_name.to_string(),
            language,
        };
        let mut map = self
            .items
            .write()
            .map_err(|_| EntityError::storage("lock poisoned"))?;
        map.insert(key, items);
        Ok(())
    }

    /// Drop every field of one entity, in all languages.
    pub fn clear_entity(&self, entity_type: &str, id: &EntityId) -> EntityResult<()> {
        let mut map = self
            .items
            .write()
            .map_err(|_| EntityError::storage("lock poisoned"))?;
        map.retain(|k, _| !(k.entity_type == entity_type && k.id == *id));
        Ok(())
    }
}

impl FieldProvider for InMemoryFieldStore {
    fn get_items(
        &self,
        entity_type: &str,
        entity: &dyn EntityRecord,
        field_name: &str,
        language: Option<&LanguageCode>,
    ) -> EntityResult<Option<Vec<FieldItem>>> {
        let Some(id) = entity.id() else {
            return Ok(None);
        };
        let key = FieldKey {
            entity_type: entity_type.to_string(),
            id,
            field_name: field_name.to_string(),
            language: language.cloned(),
        };
        let map = self
            .items
            .read()
            .map_err(|_| EntityError::storage("lock poisoned"))?;
        Ok(map.get(&key).cloned())
    }
}
