//! # Chain
//!
//! An ordered, append-only list of records rooted in a fixed genesis
//! record. Every record after genesis points back at its predecessor's
//! digest.
//!
//! Nothing here prevents out-of-band edits; [`Chain::replace`] even exposes
//! one on purpose. Integrity is detection-only: [`Chain::verify`] walks the
//! list, recomputes every digest, and reports the first record that does not
//! add up. A chain found broken is not frozen and can still be appended to.

use serde::{Deserialize, Serialize};

use crate::error::{ChainError, ChainResult, IntegrityError};
use crate::storage::payload::{Payload, Timestamp};
use crate::storage::record::Record;

/// Ordered, hash-linked records.
///
/// Index 0 holds the genesis record. Chains built with [`Chain::new`] start
/// from [`Record::genesis`]; imported chains keep whatever first record the
/// export carried, unchecked, since [`Chain::verify`] never inspects genesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ChainExport")]
pub struct Chain {
    records: Vec<Record>,
}

/// Wire shape of an export, checked before it becomes a [`Chain`].
#[derive(Deserialize)]
struct ChainExport {
    records: Vec<Record>,
}

impl TryFrom<ChainExport> for Chain {
    type Error = ChainError;

    fn try_from(export: ChainExport) -> Result<Self, Self::Error> {
        if export.records.is_empty() {
            return Err(ChainError::EmptyChain);
        }
        Ok(Chain {
            records: export.records,
        })
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}

impl Chain {
    /// A chain holding only the genesis record.
    pub fn new() -> Self {
        Chain {
            records: vec![Record::genesis()],
        }
    }

    // -----------------------------------------------------------------------
    // Append
    // -----------------------------------------------------------------------

    /// Seal a new record onto the tip and return it.
    ///
    /// `position` is trusted as given. See [`Chain::append_checked`] for the
    /// strict variant.
    pub fn append(
        &mut self,
        position: u64,
        timestamp: impl Into<Timestamp>,
        payload: impl Into<Payload>,
    ) -> &Record {
        let record = Record::new(position, timestamp, payload, self.tip().digest().clone());
        self.push_sealed(record)
    }

    /// Append a record-like value. Its `previous_digest` and `digest` are
    /// discarded and recomputed against the current tip.
    pub fn push(&mut self, record: Record) -> &Record {
        let record = record.relink(self.tip().digest().clone());
        self.push_sealed(record)
    }

    /// Like [`Chain::append`], but `position` must equal the current length.
    ///
    /// # Errors
    ///
    /// [`ChainError::PositionOutOfOrder`] when it does not. The chain is left
    /// untouched.
    pub fn append_checked(
        &mut self,
        position: u64,
        timestamp: impl Into<Timestamp>,
        payload: impl Into<Payload>,
    ) -> ChainResult<&Record> {
        let expected = self.next_position();
        if position != expected {
            return Err(ChainError::PositionOutOfOrder {
                expected,
                got: position,
            });
        }
        Ok(self.append(position, timestamp, payload))
    }

    fn push_sealed(&mut self, record: Record) -> &Record {
        tracing::debug!(
            position = record.position(),
            digest = %record.digest(),
            previous = %record.previous_digest(),
            "record appended"
        );
        self.records.push(record);
        self.tip()
    }

    // -----------------------------------------------------------------------
    // Integrity
    // -----------------------------------------------------------------------

    /// Walk the chain and report the first integrity violation.
    ///
    /// For every record after genesis, in order:
    ///
    /// 1. its stored digest must match its recomputed digest;
    /// 2. its `previous_digest` must match the preceding record's digest.
    ///
    /// Genesis has no predecessor and is not checked. Stops at the first
    /// failure. Never mutates the chain.
    pub fn verify(&self) -> Result<(), IntegrityError> {
        for (index, pair) in self.records.windows(2).enumerate() {
            let (previous, current) = (&pair[0], &pair[1]);
            let index = index + 1;

            let computed = current.compute_digest();
            if current.digest() != &computed {
                let fault = IntegrityError::DigestMismatch {
                    index,
                    stored: current.digest().clone(),
                    computed,
                };
                tracing::warn!(%fault, "chain integrity check failed");
                return Err(fault);
            }

            if current.previous_digest() != previous.digest() {
                let fault = IntegrityError::BrokenLink {
                    index,
                    expected: previous.digest().clone(),
                    found: current.previous_digest().clone(),
                };
                tracing::warn!(%fault, "chain integrity check failed");
                return Err(fault);
            }
        }
        Ok(())
    }

    /// `true` when [`Chain::verify`] finds nothing wrong.
    pub fn validate(&self) -> bool {
        self.verify().is_ok()
    }

    // -----------------------------------------------------------------------
    // Out-of-band edits
    // -----------------------------------------------------------------------

    /// Swap the record at `index` for `record`, returning the old one.
    ///
    /// Nothing is resealed or relinked. This is the one way to rewrite
    /// history, and [`Chain::verify`] will notice.
    ///
    /// # Errors
    ///
    /// [`ChainError::GenesisImmutable`] for index 0,
    /// [`ChainError::IndexOutOfRange`] past the tip.
    pub fn replace(&mut self, index: usize, record: Record) -> ChainResult<Record> {
        if index == 0 {
            return Err(ChainError::GenesisImmutable);
        }
        let len = self.records.len();
        let slot = self
            .records
            .get_mut(index)
            .ok_or(ChainError::IndexOutOfRange { index, len })?;
        tracing::debug!(index, "record replaced out of band");
        Ok(std::mem::replace(slot, record))
    }

    // -----------------------------------------------------------------------
    // Export / Import
    // -----------------------------------------------------------------------

    /// Compact JSON export carrying every field, stored digests included.
    pub fn to_json(&self) -> ChainResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON export, for display.
    pub fn to_json_pretty(&self) -> ChainResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rebuild a chain from an export.
    ///
    /// No integrity checking happens here, and the first record is taken as
    /// genesis as-is; run [`Chain::verify`] on the result.
    ///
    /// # Errors
    ///
    /// Malformed JSON, or an empty record list.
    pub fn from_json(json: &str) -> ChainResult<Self> {
        let export: ChainExport = serde_json::from_str(json)?;
        let chain = Chain::try_from(export)?;
        tracing::info!(records = chain.len(), "chain imported");
        Ok(chain)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Number of records, genesis included. Never zero.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`: a chain holds at least its genesis record.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn genesis(&self) -> &Record {
        &self.records[0]
    }

    /// The most recently appended record.
    pub fn tip(&self) -> &Record {
        // Construction and import both guarantee at least one record.
        &self.records[self.records.len() - 1]
    }

    /// Position an honest next append would carry.
    pub fn next_position(&self) -> u64 {
        self.records.len() as u64
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Digest;
    use serde_json::json;

    fn two_record_chain() -> Chain {
        let mut chain = Chain::new();
        chain.append(1, "02/10/2024", json!({"amount": 4}));
        chain.append(2, "03/10/2024", json!({"amount": 10}));
        chain
    }

    #[test]
    fn new_chain_holds_only_genesis() {
        let chain = Chain::new();
        assert_eq!(chain.len(), 1);
        assert!(!chain.is_empty());
        assert_eq!(chain.genesis().position(), 0);
        assert!(chain.genesis().previous_digest().is_sentinel());
        assert!(chain.validate());
    }

    #[test]
    fn append_links_to_previous_tip() {
        let mut chain = Chain::new();
        for i in 1..=5u64 {
            let before = chain.tip().digest().clone();
            let appended = chain.append(i, format!("t{}", i), json!({"amount": i}));
            assert_eq!(appended.previous_digest(), &before);
            assert_eq!(appended.position(), i);
        }
        assert_eq!(chain.len(), 6);
        assert!(chain.validate());
    }

    #[test]
    fn push_overwrites_link_and_digest() {
        let mut chain = Chain::new();
        let stray = Record::from_parts(
            1,
            Timestamp::from("t"),
            Payload::from("p"),
            Digest::from_hex_unchecked("bogus-prev"),
            Digest::from_hex_unchecked("bogus-digest"),
        );
        let genesis_digest = chain.genesis().digest().clone();
        let pushed = chain.push(stray);
        assert_eq!(pushed.previous_digest(), &genesis_digest);
        assert!(pushed.is_sealed());
        assert!(chain.validate());
    }

    #[test]
    fn append_is_permissive_about_positions() {
        let mut chain = Chain::new();
        chain.append(7, "t", "skipped ahead");
        chain.append(3, "t", "went back");
        assert!(chain.validate());
    }

    #[test]
    fn append_checked_rejects_out_of_order_positions() {
        let mut chain = Chain::new();
        assert!(chain.append_checked(1, "t", "ok").is_ok());
        let err = chain.append_checked(5, "t", "bad").unwrap_err();
        assert!(matches!(
            err,
            ChainError::PositionOutOfOrder {
                expected: 2,
                got: 5
            }
        ));
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn payload_tamper_is_a_digest_mismatch() {
        let mut chain = two_record_chain();
        let original = chain.get(1).unwrap().clone();
        chain
            .replace(1, original.with_payload(json!({"amount": 100})))
            .unwrap();

        assert!(!chain.validate());
        match chain.verify() {
            Err(IntegrityError::DigestMismatch { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected digest mismatch, got {:?}", other),
        }
    }

    #[test]
    fn forged_digest_is_a_broken_link() {
        let mut chain = two_record_chain();
        let original = chain.get(1).unwrap().clone();
        let forged = original.with_payload(json!({"amount": 100})).reseal();
        assert!(forged.is_sealed());
        chain.replace(1, forged).unwrap();

        match chain.verify() {
            Err(IntegrityError::BrokenLink { index, .. }) => assert_eq!(index, 2),
            other => panic!("expected broken link, got {:?}", other),
        }
    }

    #[test]
    fn tampered_chain_can_still_be_appended_to() {
        let mut chain = two_record_chain();
        let r = chain.get(2).unwrap().clone();
        chain.replace(2, r.with_payload("x")).unwrap();
        assert!(!chain.validate());

        chain.append(3, "t", "more");
        assert_eq!(chain.len(), 4);
        assert!(!chain.validate());
    }

    #[test]
    fn verify_is_idempotent() {
        let chain = two_record_chain();
        let before = chain.clone();
        assert!(chain.validate());
        assert!(chain.validate());
        assert_eq!(chain, before);
    }

    #[test]
    fn replace_refuses_genesis_and_out_of_range() {
        let mut chain = two_record_chain();
        let g = chain.genesis().clone();
        assert!(matches!(
            chain.replace(0, g.clone()),
            Err(ChainError::GenesisImmutable)
        ));
        assert!(matches!(
            chain.replace(9, g),
            Err(ChainError::IndexOutOfRange { index: 9, len: 3 })
        ));
    }

    #[test]
    fn genesis_is_not_itself_checked() {
        let mut chain = Chain::new();
        // A lone genesis with a bad digest still validates: there are no links.
        chain.records[0] = Record::genesis().with_payload("rewritten");
        assert!(chain.validate());
    }

    #[test]
    fn export_import_roundtrip() {
        let chain = two_record_chain();
        let json = chain.to_json_pretty().unwrap();
        let back = Chain::from_json(&json).unwrap();
        assert_eq!(chain, back);
        assert!(back.validate());
    }

    #[test]
    fn import_rejects_empty_record_list() {
        assert!(matches!(
            Chain::from_json(r#"{"records": []}"#),
            Err(ChainError::EmptyChain)
        ));
        assert!(serde_json::from_str::<Chain>(r#"{"records": []}"#).is_err());
    }

    #[test]
    fn import_keeps_a_foreign_first_record_as_genesis() {
        let foreign = Record::new(0, "31/12/2023", "another origin", Digest::sentinel());
        let mut chain = Chain {
            records: vec![foreign.clone()],
        };
        chain.append(1, "t", "p");

        let back = Chain::from_json(&chain.to_json().unwrap()).unwrap();
        assert_eq!(back.genesis(), &foreign);
        assert_ne!(back.genesis(), &Record::genesis());
        assert!(back.validate());
    }

    #[test]
    fn import_rejects_malformed_json() {
        assert!(matches!(
            Chain::from_json("{"),
            Err(ChainError::Serialization(_))
        ));
    }

    #[test]
    fn iteration_visits_records_in_order() {
        let chain = two_record_chain();
        let positions: Vec<u64> = chain.iter().map(Record::position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert_eq!((&chain).into_iter().count(), 3);
    }
}
