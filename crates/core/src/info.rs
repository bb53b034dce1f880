//! Entity-type metadata and the registry seam that serves it.

use serde::{Deserialize, Serialize};

use crate::error::{EntityError, EntityResult};
use crate::property::{EntityUri, PropertyMap};

/// Metadata describing one entity type.
///
/// `bundle_key` is the explicit answer to "does this type use bundles": when
/// it is `None` every entity of the type has `bundle() == entity_type()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityInfo {
    pub entity_type: String,
    /// Human-readable name of the type (e.g. "Content").
    pub label: String,
    /// Property holding the identifier.
    pub id_key: String,
    /// Property holding the revision identifier, for revisioned types.
    #[serde(default)]
    pub revision_key: Option<String>,
    /// Property selecting the bundle, for types with sub-classification.
    #[serde(default)]
    pub bundle_key: Option<String>,
    /// Property holding the human label.
    #[serde(default)]
    pub label_key: Option<String>,
    /// Path prefix for entity URIs (`node` gives `node/{id}`).
    #[serde(default)]
    pub base_path: Option<String>,
}

impl EntityInfo {
    pub fn new(entity_type: impl Into<String>, id_key: impl Into<String>) -> Self {
        let entity_type = entity_type.into();
        Self {
            label: entity_type.clone(),
            entity_type,
            id_key: id_key.into(),
            revision_key: None,
            bundle_key: None,
            label_key: None,
            base_path: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_revision_key(mut self, key: impl Into<String>) -> Self {
        self.revision_key = Some(key.into());
        self
    }

    pub fn with_bundle_key(mut self, key: impl Into<String>) -> Self {
        self.bundle_key = Some(key.into());
        self
    }

    pub fn with_label_key(mut self, key: impl Into<String>) -> Self {
        self.label_key = Some(key.into());
        self
    }

    pub fn with_base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    pub fn has_bundles(&self) -> bool {
        self.bundle_key.is_some()
    }

    pub fn is_revisionable(&self) -> bool {
        self.revision_key.is_some()
    }

    /// Check the metadata is internally consistent.
    pub fn validate(&self) -> EntityResult<()> {
        if self.entity_type.trim().is_empty() {
            return Err(EntityError::malformed("entity type name cannot be empty"));
        }
        if self.id_key.trim().is_empty() {
            return Err(EntityError::malformed(format!(
                "{}: id key cannot be empty",
                self.entity_type
            )));
        }
        let others = [&self.revision_key, &self.bundle_key];
        for key in others.into_iter().flatten() {
            if key.trim().is_empty() {
                return Err(EntityError::malformed(format!(
                    "{}: metadata keys cannot be empty",
                    self.entity_type
                )));
            }
            if *key == self.id_key {
                return Err(EntityError::malformed(format!(
                    "{}: key `{key}` is used twice",
                    self.entity_type
                )));
            }
        }
        if self.revision_key.is_some() && self.revision_key == self.bundle_key {
            return Err(EntityError::malformed(format!(
                "{}: revision and bundle keys must differ",
                self.entity_type
            )));
        }
        Ok(())
    }
}

impl EntityInfo {
    /// Check an entity's serialized properties and URI against the metadata.
    ///
    /// Every key named here must be a property, and a URI must sit under
    /// `base_path`.
    pub fn check_conforms(&self, values: &PropertyMap, uri: Option<&EntityUri>) -> EntityResult<()> {
        let keys = std::iter::once(&self.id_key)
            .chain(self.revision_key.as_ref())
            .chain(self.bundle_key.as_ref())
            .chain(self.label_key.as_ref());
        for key in keys {
            if !values.contains_key(key) {
                return Err(EntityError::malformed(format!(
                    "{}: metadata key `{key}` is not a property",
                    self.entity_type
                )));
            }
        }

        if let (Some(base), Some(uri)) = (&self.base_path, uri) {
            let prefix = format!("{}/", base.trim_end_matches('/'));
            if !uri.path.starts_with(&prefix) {
                return Err(EntityError::malformed(format!(
                    "{}: uri `{}` is outside base path `{base}`",
                    self.entity_type, uri.path
                )));
            }
        }
        Ok(())
    }
}

/// Entity-metadata registry.
pub trait EntityInfoRegistry: Send + Sync {
    /// Metadata for `entity_type`, or `UnknownEntityType`.
    fn entity_info(&self, entity_type: &str) -> EntityResult<EntityInfo>;

    /// Registered entity type names.
    fn entity_types(&self) -> Vec<String>;
}
