//! HTTP client for the radio schedule API.
//!
//! The engine only depends on the API exposing a stable `sched_id` per
//! scheduled event (usable as a dedup key) and a type discriminator; the
//! rest is formatting fodder for the handlers.

pub mod client;
pub mod error;
pub mod format;
pub mod station;
pub mod types;

pub use {
    client::RadioClient,
    error::{Error, Result},
    format::{election_line, song_line},
    station::Station,
    types::{Event, Song, StationInfo},
};
