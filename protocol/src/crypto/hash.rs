//! # Hashing Utilities
//!
//! SHA-256 is the one hash function records are sealed with. The raw
//! helpers return fixed-size arrays; [`Digest`] is the hex-encoded form that
//! actually lives inside records and exports.
//!
//! ## Why hex strings and not `[u8; 32]`?
//!
//! The genesis record's `previous_digest` is the sentinel `"0"`, which is not
//! 32 bytes of anything. Keeping digests as hex strings lets the sentinel and
//! real digests share one type, and keeps exports human-readable.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use crate::config::GENESIS_PREVIOUS_DIGEST;

/// Compute the SHA-256 hash of the input data as a fixed-size array.
///
/// # Example
///
/// ```
/// use chainlog::crypto::sha256_array;
///
/// let hash = sha256_array(b"chainlog");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256_array(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute SHA-256 and return the lowercase hex encoding.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256_array(data))
}

// ---------------------------------------------------------------------------
// Digest
// ---------------------------------------------------------------------------

/// A hex-encoded record digest.
///
/// Comparison is plain string equality. Nothing normalizes case, so a digest
/// that was re-encoded in uppercase by some outside tool no longer matches,
/// which is exactly what tamper detection wants.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// Hash `data` with SHA-256 and wrap the hex result.
    pub fn of(data: &[u8]) -> Self {
        Digest(sha256_hex(data))
    }

    /// The `"0"` sentinel the genesis record points back to.
    pub fn sentinel() -> Self {
        Digest(GENESIS_PREVIOUS_DIGEST.to_string())
    }

    /// Wrap an arbitrary string without checking it. Imports and forged
    /// digests in tests come through here.
    pub fn from_hex_unchecked(hex: impl Into<String>) -> Self {
        Digest(hex.into())
    }

    pub fn is_sentinel(&self) -> bool {
        self.0 == GENESIS_PREVIOUS_DIGEST
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
