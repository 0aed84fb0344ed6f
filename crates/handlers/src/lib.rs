//! The command set: radio status commands, account linking, and the
//! stateless fun commands.
//!
//! Every handler absorbs its own failures — a dead API or store turns into
//! an apologetic private line, malformed arguments turn into help text.
//! The dispatcher never sees an error from a handler.

pub mod account;
pub mod fun;
pub mod help;
pub mod radio;
pub mod rate;
pub mod registry;

pub use registry::build_registry;

/// Apology line used whenever the radio service cannot be reached.
pub(crate) const SERVICE_DOWN: &str = "I cannot reach the radio service right now, sorry.";
