//! Entity-type configuration.
//!
//! Metadata for entity types can be declared in TOML:
//!
//! ```toml
//! [entity_types.node]
//! label = "Content"
//! id_key = "nid"
//! revision_key = "vid"
//! bundle_key = "type"
//! base_path = "node"
//! ```
//!
//! Unknown keys do not fail loading; they come back as [`ConfigWarning`]s.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use entitykit_core::{EntityError, EntityInfo};

use crate::storage::IdStrategy;

/// Configuration loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] EntityError),
}

/// A key present in the file but not understood by the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// Dotted path of the key (`entity_types.node.bundel_key`).
    pub path: String,
}

impl core::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "unknown configuration key `{}`", self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EntityTypeConfig {
    #[serde(default)]
    pub label: Option<String>,
    pub id_key: String,
    #[serde(default)]
    pub revision_key: Option<String>,
    #[serde(default)]
    pub bundle_key: Option<String>,
    #[serde(default)]
    pub label_key: Option<String>,
    #[serde(default)]
    pub base_path: Option<String>,
    /// Identifier generation for the in-memory controller.
    #[serde(default)]
    pub id_strategy: IdStrategy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EntityTypesConfig {
    #[serde(default)]
    pub entity_types: BTreeMap<String, EntityTypeConfig>,
}

impl EntityTypesConfig {
    /// Parse TOML, collecting unknown keys as warnings.
    pub fn from_toml_str(content: &str) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        let mut unknown: Vec<String> = Vec::new();
        let deserializer = toml::de::Deserializer::new(content);
        let config: Self = serde_ignored::deserialize(deserializer, |path| {
            unknown.push(path.to_string());
        })
        .map_err(|e| ConfigError::Parse(e.to_string()))?;

        let warnings: Vec<ConfigWarning> = unknown
            .into_iter()
            .map(|path| ConfigWarning { path })
            .collect();
        for warning in &warnings {
            tracing::warn!(key = %warning.path, "ignoring unknown configuration key");
        }

        config.entity_info()?;
        Ok((config, warnings))
    }

    pub fn load(path: &Path) -> Result<(Self, Vec<ConfigWarning>), ConfigError> {
        let content = std::fs::read_to_string(path)?;
        tracing::info!(path = %path.display(), "loading entity type configuration");
        Self::from_toml_str(&content)
    }

    /// Validated metadata for every configured type.
    pub fn entity_info(&self) -> Result<Vec<EntityInfo>, ConfigError> {
        self.entity_types
            .iter()
            .map(|(name, cfg)| {
                let info = EntityInfo {
                    entity_type: name.clone(),
                    label: cfg.label.clone().unwrap_or_else(|| name.clone()),
                    id_key: cfg.id_key.clone(),
                    revision_key: cfg.revision_key.clone(),
                    bundle_key: cfg.bundle_key.clone(),
                    label_key: cfg.label_key.clone(),
                    base_path: cfg.base_path.clone(),
                };
                info.validate()?;
                Ok(info)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[entity_types.node]
label = "Content"
id_key = "nid"
revision_key = "vid"
bundle_key = "type"
base_path = "node"

[entity_types.user]
id_key = "uid"
id_strategy = "uuid"
"#;

    #[test]
    fn parses_entity_types() {
        let (config, warnings) = EntityTypesConfig::from_toml_str(SAMPLE).unwrap();
        assert!(warnings.is_empty());

        let infos = config.entity_info().unwrap();
        assert_eq!(infos.len(), 2);
        let node = &infos[0];
        assert_eq!(node.entity_type, "node");
        assert_eq!(node.revision_key.as_deref(), Some("vid"));
        assert!(node.has_bundles());
        assert_eq!(node.base_path.as_deref(), Some("node"));

        let user = &infos[1];
        assert_eq!(user.label, "user");
        assert!(!user.has_bundles());
        assert_eq!(config.entity_types["user"].id_strategy, IdStrategy::Uuid);
        assert_eq!(config.entity_types["node"].id_strategy, IdStrategy::Serial);
    }

    #[test]
    fn unknown_keys_become_warnings() {
        let toml = r#"
[entity_types.user]
id_key = "uid"
bundel_key = "kind"
"#;
        let (_config, warnings) = EntityTypesConfig::from_toml_str(toml).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].path, "entity_types.user.bundel_key");
    }

    #[test]
    fn invalid_metadata_is_an_error() {
        let toml = r#"
[entity_types.node]
id_key = "nid"
revision_key = "nid"
"#;
        assert!(matches!(
            EntityTypesConfig::from_toml_str(toml),
            Err(ConfigError::Invalid(EntityError::Malformed(_)))
        ));
    }

    #[test]
    fn syntax_errors_are_parse_errors() {
        assert!(matches!(
            EntityTypesConfig::from_toml_str("[entity_types.node"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            EntityTypesConfig::from_toml_str("[entity_types.node]\nlabel = \"x\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = EntityTypesConfig::load(Path::new("/nonexistent/entity_types.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
