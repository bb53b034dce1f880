//! Opaque entity identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::EntityError;

/// Identifier of a persisted entity (or of one of its revisions).
///
/// Storage decides the flavour: serial numeric keys or string keys (machine
/// names, UUIDs). An entity without an identifier has not been saved yet, so
/// entities hold `Option<EntityId>` rather than a sentinel value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(u64),
    Str(String),
}

impl EntityId {
    pub fn as_int(&self) -> Option<u64> {
        match self {
            EntityId::Int(v) => Some(*v),
            EntityId::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            EntityId::Int(_) => None,
            EntityId::Str(s) => Some(s),
        }
    }
}

impl core::fmt::Display for EntityId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EntityId::Int(v) => core::fmt::Display::fmt(v, f),
            EntityId::Str(s) => f.write_str(s),
        }
    }
}

impl From<u64> for EntityId {
    fn from(value: u64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl FromStr for EntityId {
    type Err = EntityError;

    /// All-digit input becomes a numeric id; anything else is kept as a string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(EntityError::invalid_id("EntityId: empty string"));
        }
        if s.bytes().all(|b| b.is_ascii_digit()) {
            let n = s
                .parse::<u64>()
                .map_err(|e| EntityError::invalid_id(format!("EntityId: {e}")))?;
            return Ok(Self::Int(n));
        }
        Ok(Self::Str(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_digits_as_numeric() {
        assert_eq!("42".parse::<EntityId>().unwrap(), EntityId::Int(42));
        assert_eq!("tags".parse::<EntityId>().unwrap(), EntityId::from("tags"));
    }

    #[test]
    fn rejects_empty_and_overflowing_input() {
        assert!(matches!("".parse::<EntityId>(), Err(EntityError::InvalidId(_))));
        assert!(matches!(
            "99999999999999999999999".parse::<EntityId>(),
            Err(EntityError::InvalidId(_))
        ));
    }

    #[test]
    fn serializes_untagged() {
        assert_eq!(serde_json::to_value(EntityId::Int(5)).unwrap(), serde_json::json!(5));
        let id: EntityId = serde_json::from_value(serde_json::json!("abc")).unwrap();
        assert_eq!(id, EntityId::from("abc"));
        assert_eq!(id.to_string(), "abc");
    }
}
