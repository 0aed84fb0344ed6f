//! "Have I already announced event X to channel Y" check.

use std::sync::Arc;

use wavebot_store::ConfigStore;

use crate::Result;

/// Outcome of a dedup check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupDecision {
    /// This event has not been announced under this key.
    New,
    /// The stored event id matches; suppress the public announcement.
    AlreadyAnnounced,
}

/// Event-identity dedup over durable state.
///
/// Equality is on the event's opaque scheduling id, not on content: an
/// event that recurs with identical content but a new id is new. An absent
/// record never equals a real event id.
#[derive(Clone)]
pub struct DedupGate {
    store: Arc<dyn ConfigStore>,
}

impl DedupGate {
    #[must_use]
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    pub async fn check(&self, key: &str, event_id: &str) -> Result<DedupDecision> {
        let stored = self.store.get(key).await?;
        if stored.as_deref() == Some(event_id) {
            Ok(DedupDecision::AlreadyAnnounced)
        } else {
            Ok(DedupDecision::New)
        }
    }

    /// Unconditionally overwrite the stored event id.
    pub async fn record(&self, key: &str, event_id: &str) -> Result<()> {
        self.store.set(key, event_id).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wavebot_store::MemoryConfigStore;

    use super::*;

    fn gate() -> DedupGate {
        DedupGate::new(Arc::new(MemoryConfigStore::new()))
    }

    #[tokio::test]
    async fn absent_record_is_new() {
        let gate = gate();
        assert_eq!(
            gate.check("dedup:4:np", "81213").await.unwrap(),
            DedupDecision::New
        );
    }

    #[tokio::test]
    async fn recorded_event_is_already_announced() {
        let gate = gate();
        gate.record("dedup:4:np", "81213").await.unwrap();
        gate.record("dedup:4:np", "81213").await.unwrap();
        assert_eq!(
            gate.check("dedup:4:np", "81213").await.unwrap(),
            DedupDecision::AlreadyAnnounced
        );
    }

    #[tokio::test]
    async fn different_event_id_is_new() {
        let gate = gate();
        gate.record("dedup:4:np", "81213").await.unwrap();
        assert_eq!(
            gate.check("dedup:4:np", "81214").await.unwrap(),
            DedupDecision::New
        );
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let gate = gate();
        gate.record("dedup:4:np", "81213").await.unwrap();
        assert_eq!(
            gate.check("dedup:3:np", "81213").await.unwrap(),
            DedupDecision::New
        );
    }
}
