//! Command pattern registry and the handler trait.
//!
//! Commands register a regex pattern, a gate policy, and a handler at
//! startup. The registry is read-only afterwards and safe to share across
//! dispatch loops.

pub mod handler;
pub mod registry;

pub use {
    handler::{BoundArgs, Handler},
    registry::{CommandRegistry, CommandSpec, GatePolicy},
};
