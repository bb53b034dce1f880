//! Default entity implementation, generic over the property schema.

use serde_json::Value;

use crate::context::EntityContext;
use crate::entity::{Entity, EntityRecord};
use crate::error::{EntityError, EntityResult};
use crate::id::EntityId;
use crate::property::{
    EntityProperties, EntityUri, IS_NEW_KEY, PropertyMap, UnknownKeyPolicy,
    properties_from_values, properties_to_values,
};

/// Entity built from an explicit property structure `P`.
///
/// Concrete kinds are aliases (`type Node = BaseEntity<NodeProperties>`).
#[derive(Debug, Clone, PartialEq)]
pub struct BaseEntity<P> {
    properties: P,
    enforce_is_new: bool,
}

impl<P: EntityProperties> BaseEntity<P> {
    pub fn new(properties: P) -> Self {
        Self {
            properties,
            enforce_is_new: false,
        }
    }

    /// Construct from an initial value mapping.
    ///
    /// `is_new` is reserved for the override flag and must be a boolean.
    /// Everything else is read into `P`; no further validation happens here.
    pub fn from_values(mut values: PropertyMap, policy: UnknownKeyPolicy) -> EntityResult<Self> {
        let enforce_is_new = match values.remove(IS_NEW_KEY) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(flag)) => flag,
            Some(other) => {
                return Err(EntityError::invalid_property(format!(
                    "{}.{IS_NEW_KEY}: expected a boolean, got {other}",
                    P::ENTITY_TYPE
                )));
            }
        };
        let properties = properties_from_values(values, policy)?;
        Ok(Self {
            properties,
            enforce_is_new,
        })
    }

    pub fn properties(&self) -> &P {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut P {
        &mut self.properties
    }

    pub fn into_properties(self) -> P {
        self.properties
    }
}

impl<P: EntityProperties> EntityRecord for BaseEntity<P> {
    fn entity_type(&self) -> &str {
        P::ENTITY_TYPE
    }

    fn bundle(&self) -> &str {
        match self.properties.bundle() {
            Some(bundle) if !bundle.trim().is_empty() => bundle,
            _ => P::ENTITY_TYPE,
        }
    }

    fn id(&self) -> Option<EntityId> {
        self.properties.id()
    }

    fn revision_id(&self) -> Option<EntityId> {
        self.properties.revision_id()
    }

    fn is_new_enforced(&self) -> bool {
        self.enforce_is_new
    }

    fn label(&self) -> Option<String> {
        self.properties.label()
    }

    fn uri(&self) -> Option<EntityUri> {
        self.properties.uri()
    }

    fn to_values(&self) -> EntityResult<PropertyMap> {
        properties_to_values(&self.properties)
    }

    fn assign_id(&mut self, id: EntityId) {
        self.properties.set_id(Some(id));
    }

    fn assign_revision_id(&mut self, id: EntityId) {
        self.properties.set_revision_id(Some(id));
    }

    fn enforce_is_new(&mut self, value: bool) {
        self.enforce_is_new = value;
    }
}

impl<P: EntityProperties> Entity for BaseEntity<P> {
    fn create_duplicate(&self, ctx: &EntityContext) -> EntityResult<Self> {
        let info = ctx.entity_info(P::ENTITY_TYPE)?;
        let mut values = properties_to_values(&self.properties)?;

        let cleared: Vec<&String> = std::iter::once(&info.id_key)
            .chain(info.revision_key.as_ref())
            .collect();
        for key in &cleared {
            values.insert((*key).clone(), Value::Null);
        }

        let properties: P = match properties_from_values(values, UnknownKeyPolicy::Reject) {
            Ok(p) => p,
            Err(EntityError::UnknownProperty(key)) => {
                return Err(EntityError::malformed(format!(
                    "metadata key {key} is not a property of the entity"
                )));
            }
            Err(EntityError::InvalidProperty(msg)) => {
                return Err(EntityError::malformed(format!(
                    "identifier keys {cleared:?} cannot be cleared: {msg}"
                )));
            }
            Err(e) => return Err(e),
        };

        if properties.id().is_some() || (info.is_revisionable() && properties.revision_id().is_some()) {
            return Err(EntityError::malformed(format!(
                "{}: metadata keys {cleared:?} do not hold the identifiers",
                P::ENTITY_TYPE
            )));
        }

        tracing::debug!(entity_type = P::ENTITY_TYPE, source = ?self.id(), "entity duplicated");

        Ok(Self {
            properties,
            enforce_is_new: self.enforce_is_new,
        })
    }
}
