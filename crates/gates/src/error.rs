/// Crate-wide result type for gate operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Gate errors: the only failure mode is the backing store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] wavebot_store::Error),
}
