use matchbook_core::CoreError;
use matchbook_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid match: {0}")]
    InvalidMatch(String),

    #[error("duplicate match: {0}")]
    DuplicateMatch(String),

    #[error("storage failure: {0}")]
    Storage(StorageError),
}

/// Lift the storage-level key collision into the engine taxonomy; every
/// other storage fault is forwarded as-is, never retried here.
impl From<StorageError> for EngineError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::DuplicateMatch { match_id } => Self::DuplicateMatch(match_id),
            other => Self::Storage(other),
        }
    }
}

impl From<CoreError> for EngineError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidMatch(msg) => Self::InvalidMatch(msg),
            other => Self::Storage(StorageError::Core(other)),
        }
    }
}
