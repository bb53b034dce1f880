//! Initial value mappings and the per-type property schema.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{EntityError, EntityResult};
use crate::id::EntityId;

/// Property name to value. Used to construct entities and to hand their
/// state to storage controllers.
pub type PropertyMap = BTreeMap<String, Value>;

/// Reserved construction key carrying the "is new" override.
pub const IS_NEW_KEY: &str = "is_new";

/// Location descriptor for an entity that can be addressed on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct EntityUri {
    pub path: String,
    #[serde(default)]
    pub options: BTreeMap<String, Value>,
}

impl EntityUri {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            options: BTreeMap::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }
}

/// What to do with construction keys the property structure does not define.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum UnknownKeyPolicy {
    /// Fail construction with `UnknownProperty`.
    #[default]
    Reject,
    /// Drop the key and log it.
    Ignore,
}

/// Explicit property structure of one entity type.
///
/// Implementors are plain serde structs; their field names are the property
/// names used in value mappings and in [`crate::EntityInfo`] keys. Identifier
/// fields must be `Option` so that a `null` clears them.
pub trait EntityProperties: Clone + core::fmt::Debug + Serialize + DeserializeOwned {
    /// Entity type tag, constant per implementor.
    const ENTITY_TYPE: &'static str;

    fn id(&self) -> Option<EntityId>;

    fn set_id(&mut self, id: Option<EntityId>);

    fn revision_id(&self) -> Option<EntityId> {
        None
    }

    /// Ignored by types without revisions.
    fn set_revision_id(&mut self, _id: Option<EntityId>) {}

    /// Bundle selected by the properties; `None` for types without bundles.
    fn bundle(&self) -> Option<&str> {
        None
    }

    fn label(&self) -> Option<String> {
        None
    }

    fn uri(&self) -> Option<EntityUri> {
        None
    }
}

/// Deserialize `values` into `P`, applying `policy` to keys `P` does not know.
pub fn properties_from_values<P: EntityProperties>(
    values: PropertyMap,
    policy: UnknownKeyPolicy,
) -> EntityResult<P> {
    let mut unknown: Vec<String> = Vec::new();
    let object = Value::Object(values.into_iter().collect());

    let properties: P = serde_ignored::deserialize(object, |path| {
        unknown.push(path.to_string());
    })
    .map_err(|e| EntityError::invalid_property(format!("{}: {e}", P::ENTITY_TYPE)))?;

    if let Some(key) = unknown.first() {
        match policy {
            UnknownKeyPolicy::Reject => {
                return Err(EntityError::unknown_property(format!(
                    "{}.{key}",
                    P::ENTITY_TYPE
                )));
            }
            UnknownKeyPolicy::Ignore => {
                tracing::debug!(
                    entity_type = P::ENTITY_TYPE,
                    keys = ?unknown,
                    "ignoring unknown properties"
                );
            }
        }
    }

    Ok(properties)
}

/// Serialize `properties` back into a value mapping.
pub fn properties_to_values<P: EntityProperties>(properties: &P) -> EntityResult<PropertyMap> {
    match serde_json::to_value(properties) {
        Ok(Value::Object(map)) => Ok(map.into_iter().collect()),
        Ok(other) => Err(EntityError::malformed(format!(
            "{}: properties serialize to {other}, expected an object",
            P::ENTITY_TYPE
        ))),
        Err(e) => Err(EntityError::malformed(format!("{}: {e}", P::ENTITY_TYPE))),
    }
}
