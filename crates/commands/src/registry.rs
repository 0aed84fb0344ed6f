//! Ordered pattern registry with first-match-wins lookup.

use std::sync::Arc;

use regex::Regex;

use crate::handler::{BoundArgs, Handler};

/// Announcement gating declared per command. Cooldown and dedup are
/// mutually exclusive: no command uses both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatePolicy {
    /// Deliver as produced.
    None,
    /// Time-window throttle on public output. The window may be overridden
    /// at runtime through the config store (`wait:<command>`).
    Cooldown { default_window_secs: u64 },
    /// Once-per-event suppression; the handler attaches the event identity
    /// to its bundle. `unit` names the event in the suppression notice
    /// ("song", "election").
    Dedup { unit: String },
}

/// Immutable binding of a match rule to a handler.
///
/// Several specs may share one handler to register alias forms (a long and
/// a short spelling of the same command).
#[derive(Clone)]
pub struct CommandSpec {
    pub name: String,
    pub pattern: Regex,
    pub gate: GatePolicy,
    pub handler: Arc<dyn Handler>,
}

impl CommandSpec {
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        gate: GatePolicy,
        handler: Arc<dyn Handler>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            pattern: Regex::new(pattern)?,
            gate,
            handler,
        })
    }
}

/// Ordered collection of pattern→handler bindings.
///
/// Registration happens once during startup; `find` is read-only and safe
/// to call concurrently from multiple dispatch loops.
#[derive(Default)]
pub struct CommandRegistry {
    specs: Vec<CommandSpec>,
}

impl CommandRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, spec: CommandSpec) {
        self.specs.push(spec);
    }

    /// Match `text` against every pattern in registration order and return
    /// the first match with its named captures bound.
    ///
    /// Patterns match anywhere in the text unless they anchor themselves.
    /// No match is a normal outcome: most chat traffic is not a command.
    #[must_use]
    pub fn find(&self, text: &str) -> Option<(&CommandSpec, BoundArgs)> {
        for spec in &self.specs {
            if let Some(captures) = spec.pattern.captures(text) {
                let mut args = BoundArgs::new();
                for name in spec.pattern.capture_names().flatten() {
                    if let Some(value) = captures.name(name) {
                        args.insert(name, value.as_str());
                    }
                }
                return Some((spec, args));
            }
        }
        None
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
