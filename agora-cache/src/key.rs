//! Composite cache keys.
//!
//! Earlier revisions of the forum keyed cached objects by primary key
//! alone, so a topic and a forum sharing id 7 landed on the same entry.
//! `CacheKey` closes that hole: the kind and facet are part of the key,
//! and a key cannot be constructed without them.
//!
//! # Binary Format
//!
//! The key encodes to a fixed 11-byte array:
//! - Byte 0: entity kind (single byte discriminant)
//! - Byte 1: facet (single byte discriminant)
//! - Byte 2: separator (0xFF)
//! - Bytes 3-10: entity id (u64, big-endian)
//!
//! This format ensures:
//! - Keys sort by kind, then facet, then id
//! - Range scans can iterate one (kind, facet) slice for invalidation
//! - Fixed-size keys keep ordered backends cheap

use agora_core::{EntityId, EntityKind};
use std::fmt;

/// Separator byte between the discriminants and the id.
const SEPARATOR: u8 = 0xFF;

/// Which projection of the entity the entry caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    /// The serialized entity body.
    Object,
    /// The entity's group-name set.
    Groups,
}

/// A cache key over `(kind, facet, id)`.
///
/// Fields are private; `object()` / `groups()` are the only constructors,
/// so a kind-less key is unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    kind: EntityKind,
    facet: Facet,
    id: EntityId,
}

impl CacheKey {
    /// Key for a cached entity body.
    pub fn object(kind: EntityKind, id: EntityId) -> Self {
        Self {
            kind,
            facet: Facet::Object,
            id,
        }
    }

    /// Key for a cached group-name lookup.
    pub fn groups(kind: EntityKind, id: EntityId) -> Self {
        Self {
            kind,
            facet: Facet::Groups,
            id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn facet(&self) -> Facet {
        self.facet
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Encode this key to a fixed-size byte array for ordered storage.
    ///
    /// Format: [kind: 1 byte][facet: 1 byte][separator: 1 byte][id: 8 bytes]
    /// Total: 11 bytes
    pub fn encode(&self) -> [u8; 11] {
        let mut bytes = [0u8; 11];

        bytes[0] = kind_to_byte(self.kind);
        bytes[1] = facet_to_byte(self.facet);
        bytes[2] = SEPARATOR;
        bytes[3..11].copy_from_slice(&self.id.to_be_bytes());

        bytes
    }

    /// Decode a key from bytes.
    ///
    /// Returns `None` if:
    /// - The byte slice is not exactly 11 bytes
    /// - The separator byte is missing or incorrect
    /// - The kind or facet byte is invalid
    pub fn decode(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != 11 {
            return None;
        }

        if bytes[2] != SEPARATOR {
            return None;
        }

        let kind = byte_to_kind(bytes[0])?;
        let facet = byte_to_facet(bytes[1])?;

        let id_bytes: [u8; 8] = bytes[3..11].try_into().ok()?;
        let id = EntityId::from_be_bytes(id_bytes);

        Some(Self { kind, facet, id })
    }

    /// Create a prefix for scanning all keys of one (kind, facet) slice.
    ///
    /// Useful for invalidating every cached entry of a kind, e.g. all
    /// forum group lookups after a membership change.
    pub fn scan_prefix(kind: EntityKind, facet: Facet) -> [u8; 3] {
        [kind_to_byte(kind), facet_to_byte(facet), SEPARATOR]
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.facet {
            Facet::Object => write!(f, "{}/{}", self.kind, self.id),
            Facet::Groups => write!(f, "{}/{}/groups", self.kind, self.id),
        }
    }
}

/// Convert EntityKind to a single-byte discriminant.
fn kind_to_byte(kind: EntityKind) -> u8 {
    match kind {
        EntityKind::Forum => 0,
        EntityKind::Topic => 1,
        EntityKind::Post => 2,
        EntityKind::User => 3,
    }
}

/// Convert a byte back to EntityKind.
fn byte_to_kind(byte: u8) -> Option<EntityKind> {
    match byte {
        0 => Some(EntityKind::Forum),
        1 => Some(EntityKind::Topic),
        2 => Some(EntityKind::Post),
        3 => Some(EntityKind::User),
        _ => None,
    }
}

/// Convert Facet to a single-byte discriminant.
fn facet_to_byte(facet: Facet) -> u8 {
    match facet {
        Facet::Object => 0,
        Facet::Groups => 1,
    }
}

/// Convert a byte back to Facet.
fn byte_to_facet(byte: u8) -> Option<Facet> {
    match byte {
        0 => Some(Facet::Object),
        1 => Some(Facet::Groups),
        _ => None,
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy to generate random entity kinds.
    fn kind_strategy() -> impl Strategy<Value = EntityKind> {
        prop_oneof![
            Just(EntityKind::Forum),
            Just(EntityKind::Topic),
            Just(EntityKind::Post),
            Just(EntityKind::User),
        ]
    }

    /// Strategy to generate random facets.
    fn facet_strategy() -> impl Strategy<Value = Facet> {
        prop_oneof![Just(Facet::Object), Just(Facet::Groups)]
    }

    fn key_strategy() -> impl Strategy<Value = CacheKey> {
        (kind_strategy(), facet_strategy(), any::<EntityId>()).prop_map(|(kind, facet, id)| {
            match facet {
                Facet::Object => CacheKey::object(kind, id),
                Facet::Groups => CacheKey::groups(kind, id),
            }
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        /// Property: Encode/decode roundtrip preserves the original key.
        #[test]
        fn prop_encode_decode_roundtrip(key in key_strategy()) {
            let encoded = key.encode();
            let decoded = CacheKey::decode(&encoded);

            prop_assert!(decoded.is_some(), "Decode should succeed for valid key");
            prop_assert_eq!(key, decoded.expect("decode should succeed"));
        }

        /// Property: Encoding is injective (different keys, different bytes).
        #[test]
        fn prop_encoding_is_injective(key1 in key_strategy(), key2 in key_strategy()) {
            if key1 == key2 {
                prop_assert_eq!(key1.encode(), key2.encode());
            } else {
                prop_assert_ne!(
                    key1.encode(),
                    key2.encode(),
                    "Different keys must have different encodings"
                );
            }
        }

        /// Property: Encoded keys are always exactly 11 bytes.
        #[test]
        fn prop_encode_length_always_11(key in key_strategy()) {
            prop_assert_eq!(key.encode().len(), 11);
        }

        /// Property: The separator byte is always at position 2.
        #[test]
        fn prop_separator_at_correct_position(key in key_strategy()) {
            prop_assert_eq!(key.encode()[2], 0xFF);
        }

        /// Property: The id is recoverable from the trailing bytes.
        #[test]
        fn prop_id_extractable(key in key_strategy()) {
            let encoded = key.encode();
            let id_bytes: [u8; 8] = encoded[3..11].try_into().expect("slice is 8 bytes");
            prop_assert_eq!(EntityId::from_be_bytes(id_bytes), key.id());
        }

        /// Property: The scan prefix is a prefix of every matching key.
        #[test]
        fn prop_scan_prefix_is_prefix(key in key_strategy()) {
            let prefix = CacheKey::scan_prefix(key.kind(), key.facet());
            prop_assert_eq!(&key.encode()[0..3], &prefix[..]);
        }
    }
}
