//! Wire types for the schedule API.

use serde::Deserialize;

/// Event types that carry playable song data.
const SONG_EVENT_TYPES: [i64; 2] = [0, 4];

/// Request states meaning "played because somebody requested it".
const REQUEST_STATES: [i64; 2] = [3, 4];

/// Request states meaning "scheduled to resolve a conflict".
const CONFLICT_STATES: [i64; 2] = [0, 1];

/// One artist credit on a song.
#[derive(Debug, Clone, Deserialize)]
pub struct Artist {
    #[serde(rename = "artist_name")]
    pub name: String,
}

/// One song inside a scheduled event.
#[derive(Debug, Clone, Deserialize)]
pub struct Song {
    #[serde(rename = "song_id", default)]
    pub id: i64,
    #[serde(rename = "album_name")]
    pub album: String,
    #[serde(rename = "song_title")]
    pub title: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(rename = "elec_votes", default)]
    pub votes: i64,
    #[serde(rename = "song_rating_count", default)]
    pub rating_count: i64,
    #[serde(rename = "song_rating_avg", default)]
    pub rating_avg: f64,
    #[serde(rename = "elec_isrequest", default = "default_request_state")]
    pub request_state: i64,
    #[serde(rename = "song_requestor", default)]
    pub requestor: Option<String>,
}

fn default_request_state() -> i64 {
    // Outside both the request and conflict ranges.
    2
}

impl Song {
    #[must_use]
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    #[must_use]
    pub fn is_request(&self) -> bool {
        REQUEST_STATES.contains(&self.request_state)
    }

    #[must_use]
    pub fn is_conflict(&self) -> bool {
        CONFLICT_STATES.contains(&self.request_state)
    }
}

/// One scheduled event: a played song, an election, or something else.
///
/// `sched_id` is the opaque, monotonically issued identifier the dedup
/// gate compares on.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    pub sched_id: i64,
    #[serde(default)]
    pub sched_type: i64,
    #[serde(rename = "song_data", default)]
    pub songs: Vec<Song>,
}

impl Event {
    /// Whether this event carries song data worth formatting.
    #[must_use]
    pub fn has_song(&self) -> bool {
        SONG_EVENT_TYPES.contains(&self.sched_type) && !self.songs.is_empty()
    }
}

/// Schedule snapshot for one station.
#[derive(Debug, Clone, Deserialize)]
pub struct StationInfo {
    pub sched_current: Event,
    #[serde(default)]
    pub sched_next: Vec<Event>,
    #[serde(default)]
    pub sched_history: Vec<Event>,
}
