//! Shared handle for callers that hand one chain to several threads.
//!
//! A single exclusive lock guards the whole record list. Appends are
//! serialized against each other and against validation, which reads every
//! record and must not observe a half-finished append.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::IntegrityError;
use crate::storage::chain::Chain;
use crate::storage::payload::{Payload, Timestamp};
use crate::storage::record::Record;

/// Cloneable, thread-safe handle to one [`Chain`].
#[derive(Debug, Clone, Default)]
pub struct SharedChain {
    inner: Arc<Mutex<Chain>>,
}

impl SharedChain {
    pub fn new() -> Self {
        Self::from_chain(Chain::new())
    }

    pub fn from_chain(chain: Chain) -> Self {
        SharedChain {
            inner: Arc::new(Mutex::new(chain)),
        }
    }

    /// Append under the lock and return a copy of the sealed record.
    pub fn append(
        &self,
        position: u64,
        timestamp: impl Into<Timestamp>,
        payload: impl Into<Payload>,
    ) -> Record {
        self.inner.lock().append(position, timestamp, payload).clone()
    }

    /// Append at the next position, whatever it is once the lock is held.
    pub fn append_next(
        &self,
        timestamp: impl Into<Timestamp>,
        payload: impl Into<Payload>,
    ) -> Record {
        let mut chain = self.inner.lock();
        let position = chain.next_position();
        chain.append(position, timestamp, payload).clone()
    }

    pub fn verify(&self) -> Result<(), IntegrityError> {
        self.inner.lock().verify()
    }

    pub fn validate(&self) -> bool {
        self.inner.lock().validate()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Copy of the chain as it stands right now.
    pub fn snapshot(&self) -> Chain {
        self.inner.lock().clone()
    }

    /// Run `f` with exclusive access to the chain.
    pub fn with<R>(&self, f: impl FnOnce(&mut Chain) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
