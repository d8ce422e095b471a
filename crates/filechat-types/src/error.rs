use thiserror::Error;

use crate::llm::LlmError;

/// Errors from repository operations (used by trait definitions in filechat-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),
}

/// Errors from handling a chat query.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("invalid chat request: {0}")]
    Validation(String),

    #[error("completion provider failed: {0}")]
    Provider(#[from] LlmError),

    #[error("failed to persist chat record: {0}")]
    Repository(#[from] RepositoryError),
}
