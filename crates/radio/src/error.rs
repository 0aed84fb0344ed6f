/// Crate-wide result type for radio API calls.
pub type Result<T> = std::result::Result<T, Error>;

/// Typed radio API errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network failure, timeout, non-success status, or a response body
    /// that did not match the expected schema.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The API reported a call-level error (e.g. a rejected rating).
    #[error("{text}")]
    Api { text: String },
}
