//! Error types for Agora operations

use crate::{EntityId, EntityKind};
use thiserror::Error;

/// Key-value store errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store backend error: {reason}")]
    Backend { reason: String },

    #[error("Serialization failed for {kind} {id}: {reason}")]
    Serialization {
        kind: EntityKind,
        id: EntityId,
        reason: String,
    },

    #[error("Deserialization failed for cache key {key}: {reason}")]
    Deserialization { key: String, reason: String },

    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Authoritative-source errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("Entity not found: {kind} with id {id}")]
    NotFound { kind: EntityKind, id: EntityId },

    #[error("Load failed for {kind} {id}: {reason}")]
    Source {
        kind: EntityKind,
        id: EntityId,
        reason: String,
    },

    #[error("Group lookup failed for {kind} {id}: {reason}")]
    GroupLookup {
        kind: EntityKind,
        id: EntityId,
        reason: String,
    },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all Agora errors.
#[derive(Debug, Clone, Error)]
pub enum AgoraError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

impl AgoraError {
    /// True when the error is a missing-entity report rather than an
    /// infrastructure failure. Callers that opted out of not-found
    /// propagation match on this.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AgoraError::Load(LoadError::NotFound { .. }))
    }
}

/// Result type alias for Agora operations.
pub type AgoraResult<T> = Result<T, AgoraError>;

// =============================================================================
// TESTS
// =============================================================================
