// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # chainlog: Core Library
//!
//! An append-only, tamper-evident log. Every record commits to the digest of
//! the one before it, so rewriting history anywhere breaks a hash somewhere,
//! and a walk over the chain finds it.
//!
//! This is not a distributed ledger. There is no consensus, no mining, no
//! network, and no disk. One process, one writer, one list of records, and
//! an integrity check.
//!
//! ## Architecture
//!
//! - **crypto** - SHA-256 and the hex `Digest` type.
//! - **canonical** - The one true byte encoding of what gets hashed.
//! - **storage** - Records, the chain, and the shared handle.
//! - **error** - What can go wrong, and what a broken chain looks like.
//! - **config** - Genesis values and digest parameters.
//!
//! ## Quick Start
//!
//! ```
//! use chainlog::storage::Chain;
//! use serde_json::json;
//!
//! let mut chain = Chain::new();
//! chain.append(1, "02/10/2024", json!({"amount": 4}));
//! chain.append(2, "03/10/2024", json!({"amount": 10}));
//! assert!(chain.validate());
//! ```
//!
//! ## Design Philosophy
//!
//! 1. Detection, not prevention. Records are immutable values, but a chain
//!    can still have one swapped out, and `verify` will say where.
//! 2. Append and validate never fail. Errors exist only at the edges.
//! 3. Same fields, same digest, on every platform, forever.

pub mod canonical;
pub mod config;
pub mod crypto;
pub mod error;
pub mod storage;

pub use error::{ChainError, ChainResult, IntegrityError};
pub use storage::{Chain, Payload, Record, SharedChain, Timestamp};
