//! Entity error model.

use thiserror::Error;

/// Result type used across the entity layer.
pub type EntityResult<T> = Result<T, EntityError>;

/// Entity-level error.
///
/// The core never recovers from collaborator failures: `Storage` and
/// `Malformed` errors raised by controllers or registries are handed back to
/// the caller unchanged. An absent field or value is not an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntityError {
    /// A storage controller could not complete the operation.
    #[error("storage failure: {0}")]
    Storage(String),

    /// An entity does not conform to the shape its metadata expects.
    #[error("malformed entity: {0}")]
    Malformed(String),

    /// No collaborator or metadata is registered for the entity type.
    #[error("unknown entity type: {0}")]
    UnknownEntityType(String),

    /// The initial value mapping carried a key the entity type does not define.
    #[error("unknown property: {0}")]
    UnknownProperty(String),

    /// A property value could not be read into the entity's property structure.
    #[error("invalid property: {0}")]
    InvalidProperty(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A language code was invalid.
    #[error("invalid language code: {0}")]
    InvalidLanguage(String),
}

impl EntityError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub fn unknown_entity_type(entity_type: impl Into<String>) -> Self {
        Self::UnknownEntityType(entity_type.into())
    }

    pub fn unknown_property(key: impl Into<String>) -> Self {
        Self::UnknownProperty(key.into())
    }

    pub fn invalid_property(msg: impl Into<String>) -> Self {
        Self::InvalidProperty(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn invalid_language(msg: impl Into<String>) -> Self {
        Self::InvalidLanguage(msg.into())
    }

    /// Whether the error came from a storage collaborator.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}
