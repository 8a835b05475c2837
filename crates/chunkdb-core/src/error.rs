use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A required collaborator (index, store, embedding model) is missing
    /// or unreachable. Fatal at startup, never retried.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The similarity search failed or returned a malformed candidate.
    /// Surfaced to the caller as a request-level failure.
    #[error("Retrieval failed: {0}")]
    Retrieval(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
