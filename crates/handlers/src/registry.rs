//! Startup wiring: every command pattern bound to its handler and gate.

use std::sync::Arc;

use {
    wavebot_commands::{CommandRegistry, CommandSpec, GatePolicy, Handler},
    wavebot_radio::RadioClient,
    wavebot_store::ConfigStore,
};

use crate::{
    account::{ApiKey, UserId},
    fun::{EightBall, Flip},
    help::Help,
    radio::{Election, NowPlaying, PrevPlayed},
    rate::Rate,
};

/// Default cooldown windows in seconds, overridable per command through the
/// store (`wait:<command>`).
pub const FLIP_WINDOW_SECS: u64 = 60;
pub const EIGHTBALL_WINDOW_SECS: u64 = 180;

/// Build the full command registry.
///
/// Long command forms register before their short aliases so the first
/// structural match is the intended one (`!election game` must not be
/// claimed by the `!el<station>` alias).
pub fn build_registry(
    prefix: &str,
    radio: RadioClient,
    store: Arc<dyn ConfigStore>,
) -> Result<CommandRegistry, regex::Error> {
    let p = regex::escape(prefix);
    let mut registry = CommandRegistry::new();

    let mut add = |name: &str, pattern: String, gate: GatePolicy, handler: Arc<dyn Handler>| {
        match CommandSpec::new(name, &pattern, gate, handler) {
            Ok(spec) => {
                registry.register(spec);
                Ok(())
            },
            Err(error) => Err(error),
        }
    };

    let dedup_song = || GatePolicy::Dedup {
        unit: "song".into(),
    };

    add(
        "help",
        format!(r"^{p}help(\s+(?P<topic>\w+))?"),
        GatePolicy::None,
        Arc::new(Help),
    )?;
    add(
        "flip",
        format!(r"^{p}flip\b"),
        GatePolicy::Cooldown {
            default_window_secs: FLIP_WINDOW_SECS,
        },
        Arc::new(Flip),
    )?;
    add(
        "8ball",
        format!(r"^{p}8ball\b"),
        GatePolicy::Cooldown {
            default_window_secs: EIGHTBALL_WINDOW_SECS,
        },
        Arc::new(EightBall),
    )?;

    let nowplaying: Arc<dyn Handler> = Arc::new(NowPlaying::new(radio.clone()));
    add(
        "nowplaying",
        format!(r"^{p}nowplaying\s+(?P<station>\w+)"),
        dedup_song(),
        nowplaying.clone(),
    )?;
    add(
        "nowplaying",
        format!(r"^{p}np(?P<station>\w+)"),
        dedup_song(),
        nowplaying,
    )?;

    let prevplayed: Arc<dyn Handler> = Arc::new(PrevPlayed::new(radio.clone()));
    add(
        "prevplayed",
        format!(r"^{p}prevplayed\s+(?P<station>\w+)(\s+(?P<index>\S+))?"),
        dedup_song(),
        prevplayed.clone(),
    )?;
    add(
        "prevplayed",
        format!(r"^{p}pp(?P<station>\w+)(\s+(?P<index>\S+))?"),
        dedup_song(),
        prevplayed,
    )?;

    let election: Arc<dyn Handler> = Arc::new(Election::new(radio.clone()));
    add(
        "election",
        format!(r"^{p}election\s+(?P<station>\w+)(\s+(?P<index>\S+))?"),
        GatePolicy::Dedup {
            unit: "election".into(),
        },
        election.clone(),
    )?;
    add(
        "election",
        format!(r"^{p}el(?P<station>\w+)(\s+(?P<index>\S+))?"),
        GatePolicy::Dedup {
            unit: "election".into(),
        },
        election,
    )?;

    add(
        "id",
        format!(r"^{p}id(\s+(?P<mode>\w+))?(\s+(?P<value>\d+))?"),
        GatePolicy::None,
        Arc::new(UserId::new(store.clone())),
    )?;
    add(
        "key",
        format!(r"^{p}key(\s+(?P<mode>\w+))?(\s+(?P<value>\S+))?"),
        GatePolicy::None,
        Arc::new(ApiKey::new(store.clone())),
    )?;

    let rate: Arc<dyn Handler> = Arc::new(Rate::new(radio, store));
    add(
        "rate",
        format!(r"^{p}rate\s+(?P<station>\w+)\s+(?P<rating>\S+)"),
        GatePolicy::None,
        rate.clone(),
    )?;
    add(
        "rate",
        format!(r"^{p}rt(?P<station>\w+)\s+(?P<rating>\S+)"),
        GatePolicy::None,
        rate,
    )?;

    Ok(registry)
}
