use std::path::PathBuf;
use std::time::Duration;

use primeblock_types::CheckpointFormatError;

/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Exclusive access to the destination could not be obtained within
    /// the writer's deadline. The destination retains its prior content.
    #[error("could not lock {path} within {waited:?}")]
    LockTimeout { path: PathBuf, waited: Duration },

    /// An existing checkpoint resource could not be parsed.
    #[error("malformed checkpoint at {path}: {source}")]
    MalformedCheckpoint {
        path: PathBuf,
        #[source]
        source: CheckpointFormatError,
    },

    /// Generic read/write/create failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
