//! Fuzz test for cache key decoding
//!
//! This fuzz target feeds arbitrary byte sequences to `CacheKey::decode`
//! to find:
//! - Panics or crashes
//! - Accepted inputs that do not round-trip back to the same bytes
//!
//! Run with: cargo +nightly fuzz run key_decode_fuzz -- -max_total_time=60

#![no_main]

use agora_cache::CacheKey;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Decoding must never panic, whatever the bytes.
    if let Some(key) = CacheKey::decode(data) {
        // Anything accepted must be exactly one encoded key.
        let encoded = key.encode();
        assert_eq!(
            data,
            encoded.as_slice(),
            "Accepted bytes should round-trip unchanged"
        );

        // Decoding the re-encoded form must agree with the original.
        let again = CacheKey::decode(&encoded);
        assert_eq!(Some(key), again, "Re-encoded key should decode identically");
    }
});
