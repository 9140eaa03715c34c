use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid match: {0}")]
    InvalidMatch(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
