use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use entitykit_core::{BaseEntity, EntityId, EntityProperties, EntityUri};

/// User account. No bundles, no revisions.
pub type User = BaseEntity<UserProperties>;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProperties {
    pub uid: Option<EntityId>,
    pub name: String,
    pub mail: Option<String>,
    /// Active (`true`) or blocked.
    pub status: bool,
    pub created: Option<DateTime<Utc>>,
}

impl UserProperties {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl EntityProperties for UserProperties {
    const ENTITY_TYPE: &'static str = "user";

    fn id(&self) -> Option<EntityId> {
        self.uid.clone()
    }

    fn set_id(&mut self, id: Option<EntityId>) {
        self.uid = id;
    }

    fn label(&self) -> Option<String> {
        if self.name.is_empty() {
            return None;
        }
        Some(self.name.clone())
    }

    fn uri(&self) -> Option<EntityUri> {
        self.uid.as_ref().map(|uid| EntityUri::new(format!("user/{uid}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entitykit_core::{EntityRecord, PropertyMap, UnknownKeyPolicy};
    use serde_json::json;

    #[test]
    fn user_bundle_is_entity_type() {
        let user = User::new(UserProperties::new("ada"));
        assert_eq!(user.bundle(), "user");
        assert_eq!(user.bundle(), user.entity_type());
        assert_eq!(user.label().as_deref(), Some("ada"));
    }

    #[test]
    fn user_with_id_is_not_new() {
        let values: PropertyMap = serde_json::from_value(json!({"uid": 5, "name": "ada"})).unwrap();
        let user = User::from_values(values, UnknownKeyPolicy::Reject).unwrap();
        assert!(!user.is_new());
        assert_eq!(user.id(), Some(EntityId::Int(5)));
        assert_eq!(user.uri().unwrap().path, "user/5");
        assert_eq!(user.revision_id(), None);
    }
}
