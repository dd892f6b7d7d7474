use bb8_postgres::bb8::RunError;
use bb8_postgres::tokio_postgres;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation failed: {0}")]
    Backend(#[from] tokio_postgres::Error),
}

impl From<RunError<tokio_postgres::Error>> for StorageError {
    fn from(e: RunError<tokio_postgres::Error>) -> Self {
        StorageError::Unavailable(e.to_string())
    }
}
