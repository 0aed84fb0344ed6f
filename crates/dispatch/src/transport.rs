//! Outbound seam to the chat network.

use {anyhow::Result, async_trait::async_trait, wavebot_common::Destination};

/// Sends one line of text to a user or a channel. The chat connection
/// behind it is an external collaborator; implementations own retries and
/// connection state, the dispatcher owns nothing but the call.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, destination: &Destination, text: &str) -> Result<()>;
}
