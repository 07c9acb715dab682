//! # Storage Module
//!
//! The in-memory hash chain and the records it is made of.
//!
//! ## Architecture
//!
//! ```text
//! payload.rs - Timestamp and Payload, the opaque caller values
//! record.rs  - Record structure, genesis record, digest/seal operations
//! chain.rs   - Append-only chain with integrity verification and export
//! shared.rs  - Lock-guarded handle for multi-threaded callers
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! (position, timestamp, payload) → Record::new ─┐
//!                                               ├→ Chain::append → records
//!                      Chain::tip().digest() ───┘
//! ```
//!
//! Nothing is persisted. Exports are JSON strings the caller may store
//! wherever it likes; importing one back gives a chain that can be verified.

pub mod chain;
pub mod payload;
pub mod record;
pub mod shared;

pub use chain::Chain;
pub use payload::{Payload, Timestamp};
pub use record::Record;
pub use shared::SharedChain;
