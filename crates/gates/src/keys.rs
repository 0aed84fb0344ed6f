//! Gate storage key constructors.
//!
//! Gate state is stored as plain values in the config store, so these keys
//! double as storage keys. Building them through one place keeps the
//! cooldown and dedup namespaces from colliding.

/// Key for a command's last-fire timestamp, e.g. `cooldown:flip`.
#[must_use]
pub fn cooldown(command: &str) -> String {
    format!("cooldown:{command}")
}

/// Key for the last-announced event of a (channel, topic) pair,
/// e.g. `dedup:4:np` or `dedup:3:el:0`.
#[must_use]
pub fn dedup(channel_id: &str, topic: &str) -> String {
    format!("dedup:{channel_id}:{topic}")
}
