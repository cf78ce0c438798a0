//! The [`CheckpointStore`] trait defining the checkpoint persistence
//! boundary.
//!
//! Any backend (file, in-memory) implements this trait to give the
//! generation loop a durable resume point.

use primeblock_types::Checkpoint;

use crate::error::StoreResult;

/// Storage backend for the generation checkpoint.
///
/// Implementations must be thread-safe (`Send + Sync`) and must never
/// expose a half-written checkpoint to readers: a `save` either fully
/// replaces the resource or leaves the previous state observable.
pub trait CheckpointStore: Send + Sync {
    /// Load the current checkpoint.
    ///
    /// If the resource exists it is parsed; a malformed resource is an
    /// error, never a silent fallback to defaults. If the resource does
    /// not exist, the default checkpoint is synthesized, persisted
    /// immediately (establishing the resource for future runs), and
    /// returned.
    fn load(&self) -> StoreResult<Checkpoint>;

    /// Durably replace the checkpoint.
    ///
    /// A successful `save` is the only way generation progress advances
    /// durably.
    fn save(&self, checkpoint: &Checkpoint) -> StoreResult<()>;
}
