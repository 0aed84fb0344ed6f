//! Per-key async locks for atomic check-then-record.
//!
//! Two concurrent public invocations on the same gate key must not both
//! observe "fresh" and both post publicly. The router takes the key's lock
//! before checking and holds it until the record is written.

use std::sync::Arc;

use {
    dashmap::DashMap,
    tokio::sync::{Mutex, OwnedMutexGuard},
};

/// Table of per-key async mutexes.
///
/// Entries are created on first use and kept for the process lifetime; the
/// key population is bounded by the registered command set.
#[derive(Clone, Default)]
pub struct KeyLocks {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `key`, waiting if another dispatch unit holds it.
    pub async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }
}
