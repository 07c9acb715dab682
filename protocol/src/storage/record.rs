//! # Record Structure
//!
//! A record is the unit the chain is built from. It carries caller data and
//! a digest that commits to that data and to the previous record's digest.
//!
//! ## Record Layout
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │  Record                                       │
//! │  ├── position: u64                            │
//! │  ├── timestamp: Timestamp   (opaque)          │
//! │  ├── payload: Payload       (opaque JSON)     │
//! │  ├── previous_digest: Digest ("0" at genesis) │
//! │  └── digest: Digest         (SHA-256, hex)    │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Sealing
//!
//! The digest covers `position || previous_digest || timestamp || payload`
//! through the canonical preimage in [`crate::canonical`]. It is computed
//! once, at construction.
//!
//! Fields are private. A record never changes after it exists; "editing" one
//! means building a new value (see [`Record::with_payload`]) and splicing it
//! into a chain, which is exactly what integrity checks are there to catch.

use serde::{Deserialize, Serialize};

use crate::canonical::record_preimage;
use crate::config::{GENESIS_PAYLOAD, GENESIS_POSITION, GENESIS_TIMESTAMP};
use crate::crypto::Digest;
use crate::storage::payload::{Payload, Timestamp};

/// One sealed entry in a chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    position: u64,
    timestamp: Timestamp,
    payload: Payload,
    previous_digest: Digest,
    digest: Digest,
}

impl Record {
    /// Build and seal a record. Accepts any input; there is nothing to reject.
    pub fn new(
        position: u64,
        timestamp: impl Into<Timestamp>,
        payload: impl Into<Payload>,
        previous_digest: Digest,
    ) -> Self {
        let timestamp = timestamp.into();
        let payload = payload.into();
        let digest = compute_record_digest(position, &previous_digest, &timestamp, &payload);
        Record {
            position,
            timestamp,
            payload,
            previous_digest,
            digest,
        }
    }

    /// The fixed first record every chain starts from.
    pub fn genesis() -> Self {
        Record::new(
            GENESIS_POSITION,
            GENESIS_TIMESTAMP,
            GENESIS_PAYLOAD,
            Digest::sentinel(),
        )
    }

    /// Assemble a record with an explicit stored digest, unchecked.
    ///
    /// Nothing verifies that `digest` matches the other fields. Use
    /// [`Record::is_sealed`] or a chain walk to find out.
    pub fn from_parts(
        position: u64,
        timestamp: Timestamp,
        payload: Payload,
        previous_digest: Digest,
        digest: Digest,
    ) -> Self {
        Record {
            position,
            timestamp,
            payload,
            previous_digest,
            digest,
        }
    }

    /// Recompute the digest from the current fields. Never mutates.
    pub fn compute_digest(&self) -> Digest {
        compute_record_digest(
            self.position,
            &self.previous_digest,
            &self.timestamp,
            &self.payload,
        )
    }

    /// True when the stored digest matches the contents.
    pub fn is_sealed(&self) -> bool {
        self.digest == self.compute_digest()
    }

    /// Return this record with a freshly computed digest.
    pub fn reseal(mut self) -> Self {
        self.digest = self.compute_digest();
        self
    }

    /// Return a copy carrying `payload` but the old, now stale, digest.
    pub fn with_payload(mut self, payload: impl Into<Payload>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Re-point this record at a new predecessor and reseal it.
    pub(crate) fn relink(mut self, previous_digest: Digest) -> Self {
        self.previous_digest = previous_digest;
        self.reseal()
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn previous_digest(&self) -> &Digest {
        &self.previous_digest
    }

    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    pub fn is_genesis(&self) -> bool {
        self.position == GENESIS_POSITION && self.previous_digest.is_sentinel()
    }
}

// ---------------------------------------------------------------------------
// Digest Computation
// ---------------------------------------------------------------------------

/// SHA-256 over the canonical preimage of a record's fields.
pub fn compute_record_digest(
    position: u64,
    previous_digest: &Digest,
    timestamp: &Timestamp,
    payload: &Payload,
) -> Digest {
    Digest::of(&record_preimage(position, previous_digest, timestamp, payload))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
