//! Configuration types

use crate::{AgoraError, AgoraResult, ConfigError};
use serde::{Deserialize, Serialize};

/// Cache tuning. TTLs are whole seconds; expiry is fixed at insertion
/// and never renewed on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheTuning {
    /// TTL applied to cached entity bodies.
    pub default_ttl_secs: u64,
    /// TTL applied to cached group-name lookups.
    pub group_ttl_secs: u64,
}

impl Default for CacheTuning {
    fn default() -> Self {
        Self {
            default_ttl_secs: 500,
            group_ttl_secs: 500,
        }
    }
}

/// Access-control tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTuning {
    /// Group name whose forums are excluded from default visibility
    /// listings unless the caller opts in. None disables the exclusion.
    pub hidden_group: Option<String>,
}

/// Master configuration for the cache and access layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgoraConfig {
    pub cache: CacheTuning,
    pub access: AccessTuning,
}

impl AgoraConfig {
    /// Validate the configuration.
    /// Returns Ok(()) if valid, Err(AgoraError::Config) if invalid.
    pub fn validate(&self) -> AgoraResult<()> {
        if self.cache.default_ttl_secs == 0 {
            return Err(AgoraError::Config(ConfigError::InvalidValue {
                field: "cache.default_ttl_secs".to_string(),
                value: self.cache.default_ttl_secs.to_string(),
                reason: "default_ttl_secs must be greater than 0".to_string(),
            }));
        }

        if self.cache.group_ttl_secs == 0 {
            return Err(AgoraError::Config(ConfigError::InvalidValue {
                field: "cache.group_ttl_secs".to_string(),
                value: self.cache.group_ttl_secs.to_string(),
                reason: "group_ttl_secs must be greater than 0".to_string(),
            }));
        }

        if let Some(name) = &self.access.hidden_group {
            if name.trim().is_empty() {
                return Err(AgoraError::Config(ConfigError::InvalidValue {
                    field: "access.hidden_group".to_string(),
                    value: name.clone(),
                    reason: "hidden_group must not be blank when set".to_string(),
                }));
            }
        }

        Ok(())
    }

    /// Create from environment variables with fallback to defaults.
    ///
    /// Environment variables:
    /// - `AGORA_CACHE_TTL_SECS`: TTL for cached entity bodies (default: 500)
    /// - `AGORA_GROUP_TTL_SECS`: TTL for cached group lookups (default: 500)
    /// - `AGORA_HIDDEN_GROUP`: hidden-group name (default: unset)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            cache: CacheTuning {
                default_ttl_secs: std::env::var("AGORA_CACHE_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.cache.default_ttl_secs),
                group_ttl_secs: std::env::var("AGORA_GROUP_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.cache.group_ttl_secs),
            },
            access: AccessTuning {
                hidden_group: std::env::var("AGORA_HIDDEN_GROUP")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
            },
        }
    }
}
