use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} not found")]
    NotFound(String),

    /// Backend failed to read or write
    #[error("storage error: {0}")]
    Backend(String),
}
