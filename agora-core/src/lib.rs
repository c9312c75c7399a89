//! Agora Core - Shared Types
//!
//! Vocabulary shared by the cache and access layers: entity kinds and ids,
//! lean entity structs, group-name sets, the error taxonomy, and runtime
//! configuration. No behavior beyond validation lives here.

pub mod config;
pub mod entity;
pub mod error;
pub mod groups;
pub mod identity;

pub use config::{AccessTuning, AgoraConfig, CacheTuning};
pub use entity::{Forum, Post, Topic, User};
pub use error::{AgoraError, AgoraResult, ConfigError, LoadError, StoreError};
pub use groups::GroupSet;
pub use identity::{EntityId, EntityKind};
