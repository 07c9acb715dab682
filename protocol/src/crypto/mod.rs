//! # Cryptographic Primitives
//!
//! A thin wrapper around the audited `sha2` implementation. Nothing here is
//! hand-rolled, and nothing here should be.

pub mod hash;

pub use hash::{sha256_array, sha256_hex, Digest};
