use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("duplicate match: {match_id}")]
    DuplicateMatch { match_id: String },

    #[error("core error: {0}")]
    Core(#[from] matchbook_core::CoreError),
}
