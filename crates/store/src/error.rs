/// Crate-wide result type for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Typed storage errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Underlying database operation failed.
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
