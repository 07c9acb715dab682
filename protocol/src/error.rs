//! Error types for chain operations.
//!
//! Two families live here. [`ChainError`] covers the fallible edges of the
//! API (import, splicing, strict appends, payload conversion). Appending and
//! validating themselves never fail. [`IntegrityError`] is not a runtime
//! fault at all: it is the detailed answer to "is this chain intact?".

use thiserror::Error;

use crate::crypto::Digest;

/// Errors raised by the fallible chain operations.
#[derive(Debug, Error)]
pub enum ChainError {
    /// A payload or export could not be encoded or decoded as JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An imported chain carried no records, not even a genesis.
    #[error("chain has no records; a genesis record is required")]
    EmptyChain,

    /// Attempted to splice over the genesis record.
    #[error("the genesis record cannot be replaced")]
    GenesisImmutable,

    /// Index past the end of the chain.
    #[error("index {index} out of range for chain of length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of records in the chain.
        len: usize,
    },

    /// A strict append received a position that does not follow the tail.
    #[error("position out of order: expected {expected}, got {got}")]
    PositionOutOfOrder {
        /// The position the next record must carry.
        expected: u64,
        /// The position the caller supplied.
        got: u64,
    },
}

/// The first integrity violation found while walking a chain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    /// The record's stored digest does not match its contents.
    #[error("record {index} digest mismatch: stored={stored}, computed={computed}")]
    DigestMismatch {
        index: usize,
        stored: Digest,
        computed: Digest,
    },

    /// The record does not point at its predecessor's digest.
    #[error("record {index} link broken: expected previous digest {expected}, found {found}")]
    BrokenLink {
        index: usize,
        expected: Digest,
        found: Digest,
    },
}

impl IntegrityError {
    /// Index of the record where the walk stopped.
    pub fn index(&self) -> usize {
        match self {
            IntegrityError::DigestMismatch { index, .. } => *index,
            IntegrityError::BrokenLink { index, .. } => *index,
        }
    }
}

/// Shorthand for results of fallible chain operations.
pub type ChainResult<T> = Result<T, ChainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrity_error_reports_index() {
        let e = IntegrityError::BrokenLink {
            index: 3,
            expected: Digest::of(b"a"),
            found: Digest::of(b"b"),
        };
        assert_eq!(e.index(), 3);
        assert!(e.to_string().starts_with("record 3 link broken"));
    }

    #[test]
    fn serde_errors_convert() {
        let err: ChainError = serde_json::from_str::<u64>("nope").unwrap_err().into();
        assert!(matches!(err, ChainError::Serialization(_)));
    }
}
