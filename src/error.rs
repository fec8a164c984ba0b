//! Error types for queue operations

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    #[error("queue handle is absent")]
    Absent,

    #[error("allocation of {bytes} bytes failed")]
    AllocFailed { bytes: usize },

    #[error("queue is empty")]
    Empty,

    #[error("queue invariant violated: {0}")]
    Corrupted(&'static str),
}

/// Result type for queue operations
pub type Result<T> = std::result::Result<T, QueueError>;
