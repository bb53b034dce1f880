//! Metadata for the content entity kinds.

use entitykit_core::EntityInfo;

pub fn node_info() -> EntityInfo {
    EntityInfo::new("node", "nid")
        .with_label("Content")
        .with_revision_key("vid")
        .with_bundle_key("type")
        .with_label_key("title")
        .with_base_path("node")
}

pub fn user_info() -> EntityInfo {
    EntityInfo::new("user", "uid")
        .with_label("User")
        .with_label_key("name")
        .with_base_path("user")
}

pub fn term_info() -> EntityInfo {
    EntityInfo::new("taxonomy_term", "tid")
        .with_label("Taxonomy term")
        .with_bundle_key("vocabulary_machine_name")
        .with_label_key("name")
        .with_base_path("taxonomy/term")
}

/// Metadata for every kind in this crate.
pub fn all_entity_info() -> Vec<EntityInfo> {
    vec![node_info(), user_info(), term_info()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Node, NodeProperties, Term, TermProperties, User, UserProperties};
    use entitykit_core::{EntityId, EntityProperties, EntityRecord};

    #[test]
    fn metadata_matches_property_structs() {
        let infos = all_entity_info();
        let types: Vec<&str> = infos.iter().map(|i| i.entity_type.as_str()).collect();
        assert_eq!(
            types,
            vec![
                NodeProperties::ENTITY_TYPE,
                UserProperties::ENTITY_TYPE,
                TermProperties::ENTITY_TYPE
            ]
        );
        for info in &infos {
            info.validate().unwrap();
        }
        assert!(node_info().has_bundles());
        assert!(!user_info().has_bundles());
        assert!(term_info().has_bundles());
    }

    #[test]
    fn saved_entities_conform_to_their_metadata() {
        let mut node = Node::new(NodeProperties::new("article", "Hello"));
        node.assign_id(EntityId::Int(1));
        node.assign_revision_id(EntityId::Int(1));
        let mut user = User::new(UserProperties::new("ada"));
        user.assign_id(EntityId::Int(2));
        let mut term = Term::new(TermProperties::new("tags", "rust"));
        term.assign_id(EntityId::Int(3));

        let records: [(&dyn EntityRecord, EntityInfo); 3] = [
            (&node as &dyn EntityRecord, node_info()),
            (&user as &dyn EntityRecord, user_info()),
            (&term as &dyn EntityRecord, term_info()),
        ];
        for (record, info) in records {
            let values = record.to_values().unwrap();
            info.check_conforms(&values, record.uri().as_ref()).unwrap();
        }
    }
}
