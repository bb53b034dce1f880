//! Entity contract: identity, lifecycle delegation and field access.

use crate::context::EntityContext;
use crate::error::EntityResult;
use crate::field::{FieldQuery, FieldValue};
use crate::id::EntityId;
use crate::property::{EntityUri, PropertyMap};
use crate::storage::SaveStatus;

/// Object-safe view of an entity, as seen by collaborators.
///
/// Storage controllers and field providers receive `&dyn EntityRecord` so they
/// can work with any entity type.
pub trait EntityRecord {
    /// Structural category; constant per concrete type.
    fn entity_type(&self) -> &str;

    /// Sub-classification within the type. Never empty; types without bundles
    /// return `entity_type()`.
    fn bundle(&self) -> &str;

    /// Returns the identifier, or `None` if the entity was never saved.
    fn id(&self) -> Option<EntityId>;

    fn revision_id(&self) -> Option<EntityId> {
        None
    }

    /// Whether the "is new" override is set.
    fn is_new_enforced(&self) -> bool;

    /// New means "not yet persisted": no identifier, or the override is set
    /// (e.g. importing with pre-assigned identifiers).
    fn is_new(&self) -> bool {
        self.is_new_enforced() || self.id().is_none()
    }

    fn label(&self) -> Option<String> {
        None
    }

    fn uri(&self) -> Option<EntityUri> {
        None
    }

    /// Property values as a mapping.
    fn to_values(&self) -> EntityResult<PropertyMap>;

    fn assign_id(&mut self, id: EntityId);

    fn assign_revision_id(&mut self, _id: EntityId) {}

    fn enforce_is_new(&mut self, value: bool);
}

/// Capability interface implemented by every concrete entity kind.
///
/// Lifecycle and field operations take the [`EntityContext`] explicitly; the
/// entity itself holds no collaborator references.
pub trait Entity: EntityRecord + Sized {
    /// Persist through the controller registered for `entity_type()`.
    ///
    /// Storage failures propagate unchanged.
    fn save(&mut self, ctx: &EntityContext) -> EntityResult<SaveStatus> {
        let entity_type = self.entity_type().to_string();
        let controller = ctx.controller(&entity_type)?;
        let status = controller.save(self)?;
        tracing::debug!(entity_type = %entity_type, id = ?self.id(), ?status, "entity saved");
        Ok(status)
    }

    /// Remove from storage. Does nothing for entities that are still new.
    fn delete(&self, ctx: &EntityContext) -> EntityResult<()> {
        if self.is_new() {
            return Ok(());
        }
        let Some(id) = self.id() else {
            return Ok(());
        };
        let controller = ctx.controller(self.entity_type())?;
        controller.delete(std::slice::from_ref(&id))?;
        tracing::debug!(entity_type = self.entity_type(), %id, "entity deleted");
        Ok(())
    }

    /// Unsaved copy with identifier and revision identifier cleared.
    fn create_duplicate(&self, ctx: &EntityContext) -> EntityResult<Self>;

    /// All values stored under `query.value_key` for the field.
    ///
    /// Empty when the field is unknown, has no items, or no item carries the key.
    fn get_field_values(
        &self,
        ctx: &EntityContext,
        field_name: &str,
        query: &FieldQuery,
    ) -> EntityResult<Vec<FieldValue>> {
        let items = ctx.field_provider().get_items(
            self.entity_type(),
            self,
            field_name,
            query.language.as_ref(),
        )?;
        Ok(items.map(|items| query.select(&items)).unwrap_or_default())
    }

    /// First of [`Entity::get_field_values`], if any.
    fn get_field_value(
        &self,
        ctx: &EntityContext,
        field_name: &str,
        query: &FieldQuery,
    ) -> EntityResult<Option<FieldValue>> {
        Ok(self
            .get_field_values(ctx, field_name, query)?
            .into_iter()
            .next())
    }
}
