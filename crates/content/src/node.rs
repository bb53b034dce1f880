use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use entitykit_core::{BaseEntity, EntityId, EntityProperties, EntityUri, LanguageCode};

/// Content item.
pub type Node = BaseEntity<NodeProperties>;

/// Properties of a node. Bundled by `type` (article, page, ...), revisioned by `vid`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeProperties {
    pub nid: Option<EntityId>,
    pub vid: Option<EntityId>,
    #[serde(rename = "type")]
    pub node_type: String,
    pub title: String,
    /// Author.
    pub uid: Option<EntityId>,
    /// Published flag.
    pub status: bool,
    pub created: Option<DateTime<Utc>>,
    pub changed: Option<DateTime<Utc>>,
    pub language: Option<LanguageCode>,
}

impl NodeProperties {
    pub fn new(node_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn is_published(&self) -> bool {
        self.status
    }
}

impl EntityProperties for NodeProperties {
    const ENTITY_TYPE: &'static str = "node";

    fn id(&self) -> Option<EntityId> {
        self.nid.clone()
    }

    fn set_id(&mut self, id: Option<EntityId>) {
        self.nid = id;
    }

    fn revision_id(&self) -> Option<EntityId> {
        self.vid.clone()
    }

    fn set_revision_id(&mut self, id: Option<EntityId>) {
        self.vid = id;
    }

    fn bundle(&self) -> Option<&str> {
        Some(&self.node_type)
    }

    fn label(&self) -> Option<String> {
        if self.title.trim().is_empty() {
            return None;
        }
        Some(self.title.clone())
    }

    fn uri(&self) -> Option<EntityUri> {
        self.nid.as_ref().map(|nid| EntityUri::new(format!("node/{nid}")))
    }
}
