//! # Protocol Constants
//!
//! Every fixed value the chain depends on lives here. The genesis values in
//! particular are load-bearing: every digest in every chain descends from
//! them, so changing one silently invalidates every export ever produced.

// ---------------------------------------------------------------------------
// Genesis
// ---------------------------------------------------------------------------

/// Position of the genesis record. Always zero.
pub const GENESIS_POSITION: u64 = 0;

/// Well-known timestamp stamped on the genesis record.
pub const GENESIS_TIMESTAMP: &str = "01/01/2024";

/// Payload carried by the genesis record.
pub const GENESIS_PAYLOAD: &str = "Genesis Block";

/// Sentinel stored in the genesis record's `previous_digest` slot.
/// It is deliberately not a valid SHA-256 hex string, so no real digest
/// can ever collide with it.
pub const GENESIS_PREVIOUS_DIGEST: &str = "0";

// ---------------------------------------------------------------------------
// Digest Parameters
// ---------------------------------------------------------------------------

/// The only hash function records are sealed with.
pub const DIGEST_ALGORITHM: &str = "SHA-256";

/// Raw digest length in bytes.
pub const DIGEST_LENGTH: usize = 32;

/// Hex-encoded digest length in characters.
pub const DIGEST_HEX_LENGTH: usize = DIGEST_LENGTH * 2;

// ---------------------------------------------------------------------------
// Versioning
// ---------------------------------------------------------------------------

/// Crate version string, for `version` output and logs.
pub const PROTOCOL_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_sizes_agree() {
        assert_eq!(DIGEST_LENGTH, 32);
        assert_eq!(DIGEST_HEX_LENGTH, 64);
    }

    #[test]
    fn genesis_sentinel_is_not_a_digest() {
        assert_ne!(GENESIS_PREVIOUS_DIGEST.len(), DIGEST_HEX_LENGTH);
    }

    #[test]
    fn protocol_version_tracks_crate_version() {
        assert_eq!(PROTOCOL_VERSION, env!("CARGO_PKG_VERSION"));
        assert_eq!(PROTOCOL_VERSION.split('.').count(), 3);
    }
}
