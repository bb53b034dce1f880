use serde::{Deserialize, Serialize};

use entitykit_core::{BaseEntity, EntityId, EntityProperties, EntityUri};

/// Taxonomy term, bundled by vocabulary.
pub type Term = BaseEntity<TermProperties>;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TermProperties {
    pub tid: Option<EntityId>,
    pub vocabulary_machine_name: String,
    pub name: String,
    pub description: Option<String>,
    pub weight: i32,
    pub parent: Option<EntityId>,
}

impl TermProperties {
    pub fn new(vocabulary: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            vocabulary_machine_name: vocabulary.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

impl EntityProperties for TermProperties {
    const ENTITY_TYPE: &'static str = "taxonomy_term";

    fn id(&self) -> Option<EntityId> {
        self.tid.clone()
    }

    fn set_id(&mut self, id: Option<EntityId>) {
        self.tid = id;
    }

    fn bundle(&self) -> Option<&str> {
        Some(&self.vocabulary_machine_name)
    }

    fn label(&self) -> Option<String> {
        Some(self.name.clone()).filter(|n| !n.is_empty())
    }

    fn uri(&self) -> Option<EntityUri> {
        self.tid
            .as_ref()
            .map(|tid| EntityUri::new(format!("taxonomy/term/{tid}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entitykit_core::EntityRecord;

    #[test]
    fn term_is_bundled_by_vocabulary() {
        let mut term = Term::new(TermProperties::new("tags", "rust"));
        assert_eq!(term.entity_type(), "taxonomy_term");
        assert_eq!(term.bundle(), "tags");

        term.properties_mut().vocabulary_machine_name.clear();
        assert_eq!(term.bundle(), "taxonomy_term");
    }

    #[test]
    fn term_uri_needs_identifier() {
        let mut term = Term::new(TermProperties::new("tags", "rust"));
        assert_eq!(term.uri(), None);
        term.assign_id(EntityId::Int(4));
        assert_eq!(term.uri().unwrap().path, "taxonomy/term/4");
        assert_eq!(term.label().as_deref(), Some("rust"));
    }
}
