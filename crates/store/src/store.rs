//! Persistence trait for key/value configuration state.

use async_trait::async_trait;

use crate::Result;

/// Durable key/value storage shared by all dispatching units.
///
/// Both operations are durable before they return. Implementations never
/// cache across calls: a restarted or concurrent process must observe the
/// same state.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
