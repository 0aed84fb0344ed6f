//! Handler trait and bound argument access.

use std::collections::HashMap;

use {
    async_trait::async_trait,
    wavebot_common::{Origin, OutputBundle},
};

/// Named captures extracted from the winning pattern, raw as matched.
///
/// Type coercion is the handler's job; a capture that fails to parse
/// degrades to a documented default or the command's help text, never an
/// error out of the registry.
#[derive(Debug, Clone, Default)]
pub struct BoundArgs {
    values: HashMap<String, String>,
}

impl BoundArgs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Parse a capture, falling back to `default` when absent or malformed.
    #[must_use]
    pub fn parse_or<T: std::str::FromStr>(&self, name: &str, default: T) -> T {
        self.get(name)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}

/// A command's business logic.
///
/// Handlers absorb collaborator failures: a failed API or store call
/// becomes an apologetic private line in the bundle, never an `Err` seen
/// by the dispatcher.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, sender: &str, origin: &Origin, args: BoundArgs) -> OutputBundle;
}
