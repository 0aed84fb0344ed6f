//! Output routing: turn a handler's bundle into a delivery plan.
//!
//! Precedence, in order: private origin delivers everything privately and
//! never consults a gate; an ungated public command splits public/private
//! as produced; a gated public command may have its public lines rerouted
//! privately with one appended notice. Check-then-record runs under the
//! key's lock so concurrent invocations cannot both post publicly.

use std::sync::Arc;

use {
    tracing::debug,
    wavebot_commands::{CommandSpec, GatePolicy},
    wavebot_common::{Destination, Origin, OutputBundle},
    wavebot_gates::{
        CooldownDecision, CooldownGate, DedupDecision, DedupGate, KeyLocks, keys, now_secs,
    },
    wavebot_store::ConfigStore,
};

use crate::Result;

/// One planned send.
pub type PlannedSend = (Destination, String);

/// Applies gate policy and origin rules to produce a delivery plan.
pub struct OutputRouter {
    cooldown: CooldownGate,
    dedup: DedupGate,
    locks: KeyLocks,
    store: Arc<dyn ConfigStore>,
    prefix: String,
}

impl OutputRouter {
    #[must_use]
    pub fn new(store: Arc<dyn ConfigStore>, prefix: impl Into<String>) -> Self {
        Self {
            cooldown: CooldownGate::new(store.clone()),
            dedup: DedupGate::new(store.clone()),
            locks: KeyLocks::new(),
            store,
            prefix: prefix.into(),
        }
    }

    /// Plan delivery for one handled message at the current time.
    pub async fn route(
        &self,
        spec: &CommandSpec,
        bundle: &OutputBundle,
        origin: &Origin,
        sender: &str,
    ) -> Result<Vec<PlannedSend>> {
        self.route_at(spec, bundle, origin, sender, now_secs()).await
    }

    /// Plan delivery with an explicit clock (tests pin `now`).
    pub async fn route_at(
        &self,
        spec: &CommandSpec,
        bundle: &OutputBundle,
        origin: &Origin,
        sender: &str,
        now: u64,
    ) -> Result<Vec<PlannedSend>> {
        let user = Destination::User {
            user_id: sender.to_string(),
        };

        // Rule 1: private origin bypasses every gate — there is no public
        // surface to protect.
        let Origin::Public { channel_id } = origin else {
            let mut plan = Vec::new();
            for line in bundle.public_lines.iter().chain(&bundle.private_lines) {
                plan.push((user.clone(), line.clone()));
            }
            return Ok(plan);
        };
        let channel = Destination::Channel {
            channel_id: channel_id.clone(),
        };

        match &spec.gate {
            GatePolicy::None => Ok(split(bundle, &channel, &user)),
            GatePolicy::Cooldown {
                default_window_secs,
            } => {
                let key = keys::cooldown(&spec.name);
                let window = self.window_secs(&spec.name, *default_window_secs).await?;
                let _guard = self.locks.acquire(&key).await;
                match self.cooldown.check(&key, window, now).await? {
                    CooldownDecision::Fresh => {
                        let plan = split(bundle, &channel, &user);
                        self.cooldown.record(&key, now).await?;
                        Ok(plan)
                    },
                    CooldownDecision::Throttled { retry_after_secs } => {
                        debug!(command = %spec.name, retry_after_secs, "cooldown throttled");
                        let notice = format!(
                            "I am cooling down. You cannot use {}{} in {} for another {} seconds.",
                            self.prefix, spec.name, channel_id, retry_after_secs
                        );
                        Ok(reroute(bundle, &user, notice))
                    },
                }
            },
            GatePolicy::Dedup { unit } => {
                // The handler attaches the event identity once it knows
                // which event it served; without one (an upstream failure
                // left only an apology) there is nothing to gate.
                let Some(announcement) = &bundle.announcement else {
                    return Ok(split(bundle, &channel, &user));
                };
                let _guard = self.locks.acquire(&announcement.key).await;
                match self
                    .dedup
                    .check(&announcement.key, &announcement.event_id)
                    .await?
                {
                    DedupDecision::New => {
                        let plan = split(bundle, &channel, &user);
                        self.dedup
                            .record(&announcement.key, &announcement.event_id)
                            .await?;
                        Ok(plan)
                    },
                    DedupDecision::AlreadyAnnounced => {
                        debug!(command = %spec.name, key = %announcement.key, "already announced");
                        let notice = format!(
                            "I am cooling down. You can only use {}{} in {} once per {}.",
                            self.prefix, spec.name, channel_id, unit
                        );
                        Ok(reroute(bundle, &user, notice))
                    },
                }
            },
        }
    }

    /// Cooldown window for a command: store override (`wait:<command>`) or
    /// the compiled-in default.
    async fn window_secs(&self, command: &str, default_secs: u64) -> Result<u64> {
        let value = self
            .store
            .get(&format!("wait:{command}"))
            .await
            .map_err(wavebot_gates::Error::from)?;
        Ok(value.and_then(|v| v.parse().ok()).unwrap_or(default_secs))
    }
}

/// Ungated split: public lines to the channel, private lines to the sender.
fn split(bundle: &OutputBundle, channel: &Destination, user: &Destination) -> Vec<PlannedSend> {
    let mut plan = Vec::new();
    for line in &bundle.public_lines {
        plan.push((channel.clone(), line.clone()));
    }
    for line in &bundle.private_lines {
        plan.push((user.clone(), line.clone()));
    }
    plan
}

/// Gated reroute: everything that would have gone public goes to the
/// sender instead, followed by the gate notice, then the private lines.
fn reroute(bundle: &OutputBundle, user: &Destination, notice: String) -> Vec<PlannedSend> {
    let mut plan = Vec::new();
    for line in &bundle.public_lines {
        plan.push((user.clone(), line.clone()));
    }
    plan.push((user.clone(), notice));
    for line in &bundle.private_lines {
        plan.push((user.clone(), line.clone()));
    }
    plan
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use {
        async_trait::async_trait,
        wavebot_commands::{BoundArgs, Handler},
        wavebot_store::MemoryConfigStore,
    };

    use super::*;

    struct Noop;

    #[async_trait]
    impl Handler for Noop {
        async fn handle(&self, _: &str, _: &Origin, _: BoundArgs) -> OutputBundle {
            OutputBundle::new()
        }
    }

    fn spec(name: &str, gate: GatePolicy) -> CommandSpec {
        CommandSpec::new(name, r"^!x\b", gate, Arc::new(Noop)).unwrap()
    }

    fn public_origin() -> Origin {
        Origin::Public {
            channel_id: "#lounge".to_string(),
        }
    }

    fn router() -> OutputRouter {
        OutputRouter::new(Arc::new(MemoryConfigStore::new()), "!")
    }

    #[tokio::test]
    async fn ungated_public_split_preserves_order() {
        let router = router();
        let mut bundle = OutputBundle::new();
        bundle.push_public("one");
        bundle.push_public("two");
        bundle.push_private("aside");

        let plan = router
            .route_at(
                &spec("x", GatePolicy::None),
                &bundle,
                &public_origin(),
                "alice",
                0,
            )
            .await
            .unwrap();

        assert_eq!(plan.len(), 3);
        assert_eq!(
            plan[0],
            (
                Destination::Channel {
                    channel_id: "#lounge".into()
                },
                "one".into()
            )
        );
        assert_eq!(plan[1].1, "two");
        assert_eq!(
            plan[2],
            (
                Destination::User {
                    user_id: "alice".into()
                },
                "aside".into()
            )
        );
    }

    #[tokio::test]
    async fn private_origin_bypasses_gates_entirely() {
        let router = router();
        let bundle = OutputBundle::public("answer").with_announcement("dedup:4:np", "100");
        let gated = spec(
            "nowplaying",
            GatePolicy::Dedup {
                unit: "song".into(),
            },
        );

        // Twice in a row: a gate would throttle the second call.
        for _ in 0..2 {
            let plan = router
                .route_at(&gated, &bundle, &Origin::Private, "alice", 0)
                .await
                .unwrap();
            assert_eq!(
                plan,
                vec![(
                    Destination::User {
                        user_id: "alice".into()
                    },
                    "answer".into()
                )]
            );
        }
    }

    #[tokio::test]
    async fn cooldown_fresh_then_throttled_with_wait() {
        let router = router();
        let gated = spec(
            "8ball",
            GatePolicy::Cooldown {
                default_window_secs: 30,
            },
        );
        let bundle = OutputBundle::public("Outlook good.");

        let plan = router
            .route_at(&gated, &bundle, &public_origin(), "alice", 0)
            .await
            .unwrap();
        assert!(matches!(plan[0].0, Destination::Channel { .. }));

        // Ten seconds later, from anyone: rerouted privately with the wait.
        let plan = router
            .route_at(&gated, &bundle, &public_origin(), "bob", 10)
            .await
            .unwrap();
        assert_eq!(plan.len(), 2);
        assert!(matches!(plan[0].0, Destination::User { ref user_id } if user_id == "bob"));
        assert_eq!(plan[0].1, "Outlook good.");
        assert_eq!(
            plan[1].1,
            "I am cooling down. You cannot use !8ball in #lounge for another 20 seconds."
        );
    }

    #[tokio::test]
    async fn cooldown_boundary_is_exclusive() {
        let router = router();
        let gated = spec(
            "8ball",
            GatePolicy::Cooldown {
                default_window_secs: 30,
            },
        );
        let bundle = OutputBundle::public("Yes.");

        router
            .route_at(&gated, &bundle, &public_origin(), "alice", 0)
            .await
            .unwrap();

        let plan = router
            .route_at(&gated, &bundle, &public_origin(), "alice", 29)
            .await
            .unwrap();
        assert!(matches!(plan[0].0, Destination::User { .. }));

        let plan = router
            .route_at(&gated, &bundle, &public_origin(), "alice", 30)
            .await
            .unwrap();
        assert!(matches!(plan[0].0, Destination::Channel { .. }));
    }

    #[tokio::test]
    async fn cooldown_window_store_override_wins() {
        let store = Arc::new(MemoryConfigStore::new());
        store.set("wait:flip", "5").await.unwrap();
        let router = OutputRouter::new(store, "!");
        let gated = spec(
            "flip",
            GatePolicy::Cooldown {
                default_window_secs: 60,
            },
        );
        let bundle = OutputBundle::public("Heads!");

        router
            .route_at(&gated, &bundle, &public_origin(), "alice", 0)
            .await
            .unwrap();
        // Six seconds later the 5s override has expired; the 60s default
        // would still be throttling.
        let plan = router
            .route_at(&gated, &bundle, &public_origin(), "alice", 6)
            .await
            .unwrap();
        assert!(matches!(plan[0].0, Destination::Channel { .. }));
    }

    #[tokio::test]
    async fn dedup_new_then_suppressed_then_new_event() {
        let router = router();
        let gated = spec(
            "nowplaying",
            GatePolicy::Dedup {
                unit: "song".into(),
            },
        );

        let first = OutputBundle::public("song A").with_announcement("dedup:4:np", "E1");
        let plan = router
            .route_at(&gated, &first, &public_origin(), "alice", 0)
            .await
            .unwrap();
        assert!(matches!(plan[0].0, Destination::Channel { .. }));

        // Same event again: private with the once-per-song notice.
        let plan = router
            .route_at(&gated, &first, &public_origin(), "bob", 1)
            .await
            .unwrap();
        assert!(matches!(plan[0].0, Destination::User { .. }));
        assert_eq!(
            plan[1].1,
            "I am cooling down. You can only use !nowplaying in #lounge once per song."
        );

        // The event changed: public again.
        let second = OutputBundle::public("song B").with_announcement("dedup:4:np", "E2");
        let plan = router
            .route_at(&gated, &second, &public_origin(), "alice", 2)
            .await
            .unwrap();
        assert!(matches!(plan[0].0, Destination::Channel { .. }));
    }

    #[tokio::test]
    async fn dedup_without_announcement_routes_ungated() {
        let router = router();
        let gated = spec(
            "nowplaying",
            GatePolicy::Dedup {
                unit: "song".into(),
            },
        );
        let bundle = OutputBundle::private("cannot reach the service, sorry");
        let plan = router
            .route_at(&gated, &bundle, &public_origin(), "alice", 0)
            .await
            .unwrap();
        assert_eq!(plan.len(), 1);
        assert!(matches!(plan[0].0, Destination::User { .. }));
    }

    #[tokio::test]
    async fn empty_bundle_plans_nothing() {
        let router = router();
        let plan = router
            .route_at(
                &spec("x", GatePolicy::None),
                &OutputBundle::new(),
                &public_origin(),
                "alice",
                0,
            )
            .await
            .unwrap();
        assert!(plan.is_empty());
    }
}
