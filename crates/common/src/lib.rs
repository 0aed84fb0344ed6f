//! Shared message and output types used across all wavebot crates.

pub mod types;

pub use types::{
    Announcement, Destination, DispatchOutcome, IncomingMessage, Origin, OutputBundle,
};
