use sea_orm::DbErr;
use thiserror::Error;

/// Failure of the underlying key-value storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(#[from] DbErr),
    #[error("failed to (de)serialize record `{key}`: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl StoreError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("import payload contained no usable list blocks")]
    NoValidBlocks,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to read import file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to encode export record: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for ExportError {
    fn from(err: StorageError) -> Self {
        Self::Store(StoreError::Storage(err))
    }
}
