//! Time-window throttle keyed by an arbitrary string key.

use std::sync::Arc;

use wavebot_store::ConfigStore;

use crate::Result;

/// Outcome of a cooldown check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownDecision {
    /// Outside the window; the caller may fire publicly.
    Fresh,
    /// Inside the window; fire again in `retry_after_secs`.
    Throttled { retry_after_secs: u64 },
}

/// Time-window throttle over durable state.
///
/// `check` never writes; only `record` mutates. An absent or unparsable
/// record means the key has never fired, so it is fresh on first use.
#[derive(Clone)]
pub struct CooldownGate {
    store: Arc<dyn ConfigStore>,
}

impl CooldownGate {
    #[must_use]
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    /// Check whether the key is outside its cooldown window at `now`.
    ///
    /// The boundary is exclusive: a key recorded exactly `window_secs` ago
    /// is fresh again.
    pub async fn check(&self, key: &str, window_secs: u64, now: u64) -> Result<CooldownDecision> {
        let Some(stored) = self.last_fire(key).await? else {
            return Ok(CooldownDecision::Fresh);
        };
        if now >= stored + window_secs {
            Ok(CooldownDecision::Fresh)
        } else {
            Ok(CooldownDecision::Throttled {
                retry_after_secs: (stored + window_secs).saturating_sub(now),
            })
        }
    }

    /// Unconditionally overwrite the stored last-fire timestamp.
    pub async fn record(&self, key: &str, now: u64) -> Result<()> {
        self.store.set(key, &now.to_string()).await?;
        Ok(())
    }

    async fn last_fire(&self, key: &str) -> Result<Option<u64>> {
        let value = self.store.get(key).await?;
        // Malformed values read as absent (always fresh).
        Ok(value.and_then(|v| v.parse().ok()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wavebot_store::MemoryConfigStore;

    use super::*;

    fn gate() -> CooldownGate {
        CooldownGate::new(Arc::new(MemoryConfigStore::new()))
    }

    #[tokio::test]
    async fn absent_record_is_always_fresh() {
        let gate = gate();
        assert_eq!(
            gate.check("cooldown:flip", 60, 10).await.unwrap(),
            CooldownDecision::Fresh
        );
    }

    #[tokio::test]
    async fn malformed_record_reads_as_absent() {
        let store = Arc::new(MemoryConfigStore::new());
        store.set("cooldown:flip", "junk").await.unwrap();
        let gate = CooldownGate::new(store);
        assert_eq!(
            gate.check("cooldown:flip", 60, 10).await.unwrap(),
            CooldownDecision::Fresh
        );
    }

    #[tokio::test]
    async fn boundary_is_exclusive() {
        let gate = gate();
        gate.record("cooldown:8ball", 0).await.unwrap();
        // One second inside the window: throttled with the remaining wait.
        assert_eq!(
            gate.check("cooldown:8ball", 30, 29).await.unwrap(),
            CooldownDecision::Throttled {
                retry_after_secs: 1
            }
        );
        // Exactly window seconds later: allowed.
        assert_eq!(
            gate.check("cooldown:8ball", 30, 30).await.unwrap(),
            CooldownDecision::Fresh
        );
    }

    #[tokio::test]
    async fn throttled_reports_remaining_wait() {
        let gate = gate();
        gate.record("cooldown:8ball", 100).await.unwrap();
        assert_eq!(
            gate.check("cooldown:8ball", 30, 110).await.unwrap(),
            CooldownDecision::Throttled {
                retry_after_secs: 20
            }
        );
    }

    #[tokio::test]
    async fn check_does_not_write() {
        let store = Arc::new(MemoryConfigStore::new());
        let gate = CooldownGate::new(store.clone());
        gate.check("cooldown:flip", 60, 1000).await.unwrap();
        assert_eq!(
            ConfigStore::get(store.as_ref(), "cooldown:flip")
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn record_overwrites() {
        let gate = gate();
        gate.record("cooldown:flip", 100).await.unwrap();
        gate.record("cooldown:flip", 200).await.unwrap();
        assert_eq!(
            gate.check("cooldown:flip", 50, 210).await.unwrap(),
            CooldownDecision::Throttled {
                retry_after_secs: 40
            }
        );
    }
}
