use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftStoreError {
    /// Backend rejected the call; carries the message to show the user.
    #[error("{0}")]
    Api(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("invalid draft data: {0}")]
    Serialization(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Api(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("transport error: {0}")]
    Transport(String),
}
