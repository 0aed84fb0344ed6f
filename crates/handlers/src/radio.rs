//! Radio status commands: now playing, previously played, elections.
//!
//! All three are dedup-gated: the handler attaches the served event's
//! scheduling id to the bundle and the router suppresses repeat public
//! announcements of the same id.

use {
    async_trait::async_trait,
    tracing::warn,
    wavebot_commands::{BoundArgs, Handler},
    wavebot_common::{Origin, OutputBundle},
    wavebot_gates::keys,
    wavebot_radio::{RadioClient, Station, election_line, song_line},
};

use crate::{SERVICE_DOWN, help::topic_lines};

/// Highest `!prevplayed` history index the API keeps.
const MAX_HISTORY_INDEX: usize = 2;

fn help_bundle(topic: &str) -> OutputBundle {
    let mut bundle = OutputBundle::new();
    for line in topic_lines(topic) {
        bundle.push_private(line);
    }
    bundle
}

fn station_or_help(args: &BoundArgs, topic: &str) -> Result<Station, OutputBundle> {
    args.get("station")
        .and_then(Station::from_code)
        .ok_or_else(|| help_bundle(topic))
}

/// `!nowplaying <station>` / `!np<station>`.
pub struct NowPlaying {
    radio: RadioClient,
}

impl NowPlaying {
    #[must_use]
    pub fn new(radio: RadioClient) -> Self {
        Self { radio }
    }
}

#[async_trait]
impl Handler for NowPlaying {
    async fn handle(&self, _sender: &str, _origin: &Origin, args: BoundArgs) -> OutputBundle {
        let station = match station_or_help(&args, "nowplaying") {
            Ok(station) => station,
            Err(help) => return help,
        };
        let info = match self.radio.info(station).await {
            Ok(info) => info,
            Err(error) => {
                warn!(station = station.name(), %error, "schedule fetch failed");
                return OutputBundle::private(SERVICE_DOWN);
            },
        };
        let event = &info.sched_current;
        OutputBundle::public(song_line(station, "Now playing", event)).with_announcement(
            keys::dedup(&station.id().to_string(), "np"),
            event.sched_id.to_string(),
        )
    }
}

/// `!prevplayed <station> [index]` / `!pp<station> [index]`.
pub struct PrevPlayed {
    radio: RadioClient,
}

impl PrevPlayed {
    #[must_use]
    pub fn new(radio: RadioClient) -> Self {
        Self { radio }
    }
}

#[async_trait]
impl Handler for PrevPlayed {
    async fn handle(&self, _sender: &str, _origin: &Origin, args: BoundArgs) -> OutputBundle {
        let station = match station_or_help(&args, "prevplayed") {
            Ok(station) => station,
            Err(help) => return help,
        };
        // Malformed index degrades to 0; a parsed but out-of-range index is
        // help text.
        let index = args.parse_or::<usize>("index", 0);
        if index > MAX_HISTORY_INDEX {
            return help_bundle("prevplayed");
        }
        let info = match self.radio.info(station).await {
            Ok(info) => info,
            Err(error) => {
                warn!(station = station.name(), %error, "schedule fetch failed");
                return OutputBundle::private(SERVICE_DOWN);
            },
        };
        let Some(event) = info.sched_history.get(index) else {
            return OutputBundle::private(SERVICE_DOWN);
        };
        OutputBundle::public(song_line(station, "Previously", event)).with_announcement(
            keys::dedup(&station.id().to_string(), &format!("pp:{index}")),
            event.sched_id.to_string(),
        )
    }
}

/// `!election <station> [index]` / `!el<station> [index]`.
pub struct Election {
    radio: RadioClient,
}

impl Election {
    #[must_use]
    pub fn new(radio: RadioClient) -> Self {
        Self { radio }
    }
}

#[async_trait]
impl Handler for Election {
    async fn handle(&self, _sender: &str, _origin: &Origin, args: BoundArgs) -> OutputBundle {
        let station = match station_or_help(&args, "election") {
            Ok(station) => station,
            Err(help) => return help,
        };
        let index = args.parse_or::<usize>("index", 0);
        if index > 1 {
            return help_bundle("election");
        }
        let info = match self.radio.info(station).await {
            Ok(info) => info,
            Err(error) => {
                warn!(station = station.name(), %error, "schedule fetch failed");
                return OutputBundle::private(SERVICE_DOWN);
            },
        };
        let Some(event) = info.sched_next.get(index) else {
            return OutputBundle::private(SERVICE_DOWN);
        };
        OutputBundle::public(election_line(station, index, event)).with_announcement(
            keys::dedup(&station.id().to_string(), &format!("el:{index}")),
            event.sched_id.to_string(),
        )
    }
}
