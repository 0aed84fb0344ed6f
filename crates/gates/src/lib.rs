//! Announcement gating: cooldown windows and event dedup.
//!
//! Both gates are stateless logic over the [`wavebot_store::ConfigStore`]
//! contract — they read and write through it on every call and never cache,
//! so a restarted or concurrent process observes consistent state.

pub mod cooldown;
pub mod dedup;
pub mod error;
pub mod keys;
pub mod locks;

pub use {
    cooldown::{CooldownDecision, CooldownGate},
    dedup::{DedupDecision, DedupGate},
    error::{Error, Result},
    locks::KeyLocks,
};

/// Current unix time in whole seconds.
#[must_use]
pub fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
