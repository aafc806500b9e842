//! Error types for the delivery queue.

/// Error type for queue and transport operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The drain task has stopped and no longer accepts items.
    #[error("Statement queue is closed")]
    Closed,

    /// The transport rejected a record.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Writing to the underlying sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The drain task panicked or was aborted.
    #[error("Drain task failed: {0}")]
    DrainTask(String),
}

/// Result type alias for queue operations.
pub type Result<T> = std::result::Result<T, Error>;
