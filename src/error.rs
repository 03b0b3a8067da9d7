use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Corrupted data: {0}")]
    CorruptedData(String),
    #[error("Invalid date '{input}', expected yyyy-mm-dd: {source}")]
    InvalidDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    StorageError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
