//! Message dispatch: match, invoke, gate, deliver.
//!
//! One incoming message is one independent unit of work. The only shared
//! state is gate state behind the config store, made safe by per-key locks
//! held across each check-then-record pair.

pub mod dispatcher;
pub mod error;
pub mod router;
pub mod transport;

pub use {
    dispatcher::{Dispatcher, serve},
    error::{Error, Result},
    router::OutputRouter,
    transport::Transport,
};
