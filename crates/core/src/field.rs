//! Field items and the field-value provider seam.
//!
//! Fields are not stored on entities. A [`FieldProvider`] owns them and hands
//! back the raw items for an entity; the entity layer only applies the
//! "first value" / "all values" selection on top.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entity::EntityRecord;
use crate::error::{EntityError, EntityResult};

/// Value stored under one key of a field item.
pub type FieldValue = Value;

/// A single field item: value key (e.g. `"value"`, `"format"`, `"tid"`) to value.
pub type FieldItem = BTreeMap<String, FieldValue>;

/// Value key read when none is requested.
pub const DEFAULT_VALUE_KEY: &str = "value";

/// Language code for field values (`"en"`, `"pt-br"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Code for values that are not language-specific.
    pub const NONE: &'static str = "und";

    pub fn new(code: impl Into<String>) -> EntityResult<Self> {
        let code = code.into();
        let valid = !code.is_empty()
            && code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(EntityError::invalid_language(code));
        }
        Ok(Self(code))
    }

    pub fn none() -> Self {
        Self(Self::NONE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = EntityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LanguageCode> for String {
    fn from(value: LanguageCode) -> Self {
        value.0
    }
}

/// Which values to read from a field.
///
/// `FieldQuery::default()` reads the `"value"` key with no language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldQuery {
    pub value_key: String,
    pub language: Option<LanguageCode>,
}

impl Default for FieldQuery {
    fn default() -> Self {
        Self {
            value_key: DEFAULT_VALUE_KEY.to_string(),
            language: None,
        }
    }
}

impl FieldQuery {
    /// Read `value_key` instead of `"value"`.
    pub fn key(value_key: impl Into<String>) -> Self {
        Self {
            value_key: value_key.into(),
            language: None,
        }
    }

    pub fn language(mut self, language: LanguageCode) -> Self {
        self.language = Some(language);
        self
    }

    /// Pick the requested key out of each item.
    ///
    /// Items lacking the key, or holding `null` under it, contribute nothing.
    pub fn select(&self, items: &[FieldItem]) -> Vec<FieldValue> {
        items
            .iter()
            .filter_map(|item| item.get(&self.value_key))
            .filter(|value| !value.is_null())
            .cloned()
            .collect()
    }
}

/// Field-value provider.
///
/// Returns `Ok(None)` when the field is unknown or holds nothing for the
/// entity; errors are reserved for provider failures.
pub trait FieldProvider: Send + Sync {
    fn get_items(
        &self,
        entity_type: &str,
        entity: &dyn EntityRecord,
        field_name: &str,
        language: Option<&LanguageCode>,
    ) -> EntityResult<Option<Vec<FieldItem>>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(pairs: &[(&str, Value)]) -> FieldItem {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn select_skips_items_without_the_key() {
        let items = vec![
            item(&[("value", json!("a"))]),
            item(&[("format", json!("plain"))]),
            item(&[("value", Value::Null)]),
            item(&[("value", json!("b"))]),
        ];
        assert_eq!(FieldQuery::default().select(&items), vec![json!("a"), json!("b")]);
        assert_eq!(FieldQuery::key("format").select(&items), vec![json!("plain")]);
        assert!(FieldQuery::key("tid").select(&items).is_empty());
    }

    #[test]
    fn language_codes_are_validated() {
        assert!(LanguageCode::new("pt-br").is_ok());
        assert!(matches!(LanguageCode::new(""), Err(EntityError::InvalidLanguage(_))));
        assert!(matches!(LanguageCode::new("en us"), Err(EntityError::InvalidLanguage(_))));

        let parsed: Result<LanguageCode, _> = serde_json::from_value(json!("x/y"));
        assert!(parsed.is_err());
        assert_eq!(LanguageCode::none().as_str(), LanguageCode::NONE);
        assert_eq!(LanguageCode::NONE, "und");
    }
}
