pub mod channel;
pub mod location;
pub mod repository;

/// Failure taxonomy shared by every tripkit crate.
///
/// Only `StorageError` is ever surfaced as a server fault; the others are
/// reported to the caller as a structured `{error}` body.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    StateError(String),
    #[error("Provider failure: {0}")]
    ProviderFailure(String),
    #[error("Storage failure: {0}")]
    StorageError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
