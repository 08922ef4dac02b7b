pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    #[error("snapshot serialization failed: {0}")]
    SnapshotEncode(#[from] serde_json::Error),
}
