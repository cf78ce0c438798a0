use primeblock_engine::EngineError;
use primeblock_store::StoreError;
use thiserror::Error;

/// Errors from the high-level PrimeBlock API.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Generation failed (missing primitive, invalid configuration).
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Storage failed outside the commit window (checkpoint load, or a
    /// block write whose failure is reported through the block report
    /// instead).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A block file was written but the checkpoint describing it could
    /// not be saved. The two resources are now out of sync: the named
    /// block exists on disk while the stored `primeBlockCount` and
    /// `primeCount` still describe the previous state. This is the known
    /// residual risk of the two-file commit protocol; it is surfaced,
    /// never silently repaired.
    #[error("block {filename} was written but the checkpoint could not be saved: {source}")]
    CheckpointOutOfSync {
        filename: String,
        #[source]
        source: StoreError,
    },

    /// `retry_persist` was called with no unsaved block outstanding.
    #[error("no unsaved block to persist")]
    NoPendingBlock,
}

/// Result alias for SDK operations.
pub type SdkResult<T> = Result<T, SdkError>;
