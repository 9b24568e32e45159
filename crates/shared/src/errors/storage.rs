use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Stale write: persisted revision {persisted} is ahead of attempted revision {attempted}")]
    StaleRevision { persisted: u64, attempted: u64 },
}
