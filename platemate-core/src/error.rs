use thiserror::Error;

/// Input that does not have the shape an operation expects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to encode snapshot: {0}")]
    Encode(String),

    #[error("Failed to decode snapshot: {0}")]
    Decode(String),

    #[error("Snapshot version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record {id} not found in {collection}")]
    NotFound { collection: String, id: String },

    #[error("Record {id} already exists in {collection}")]
    Conflict { collection: String, id: String },

    #[error("Storage I/O failed: {0}")]
    Io(String),

    #[error("Invalid record data: {0}")]
    Serialization(String),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
