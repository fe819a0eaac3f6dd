use thiserror::Error;

/// Error for session store operations
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    StorageError(String),
}
