//! Durable key/value configuration storage.
//!
//! Gate state (cooldown timestamps, dedup event ids) and per-user settings
//! live here, so they survive restarts and are shared by every concurrently
//! dispatching unit.

pub mod error;
pub mod store;
pub mod store_memory;
pub mod store_sqlite;

pub use {
    error::{Error, Result},
    store::ConfigStore,
    store_memory::MemoryConfigStore,
    store_sqlite::SqliteConfigStore,
};
