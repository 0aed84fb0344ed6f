/// Crate-wide result type for dispatch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Dispatch failures are fatal per message, never per process.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Gate state could not be read or written.
    #[error(transparent)]
    Gate(#[from] wavebot_gates::Error),

    /// The transport rejected a send.
    #[error("delivery failed: {source}")]
    Delivery {
        #[source]
        source: anyhow::Error,
    },
}
