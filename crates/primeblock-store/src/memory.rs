//! In-memory checkpoint store for testing and ephemeral use.
//!
//! [`InMemoryCheckpointStore`] keeps the checkpoint in a `RwLock`-guarded
//! slot. It implements the full [`CheckpointStore`] trait and is suitable
//! for unit tests and short-lived embedding; state is lost when the store
//! is dropped.

use std::sync::RwLock;

use primeblock_types::Checkpoint;

use crate::error::StoreResult;
use crate::traits::CheckpointStore;

/// An in-memory implementation of [`CheckpointStore`].
#[derive(Debug, Default)]
pub struct InMemoryCheckpointStore {
    slot: RwLock<Option<Checkpoint>>,
}

impl InMemoryCheckpointStore {
    /// Create a store with no checkpoint yet (the default is synthesized
    /// on first `load`, matching the file-backed behavior).
    pub fn new() -> Self {
        Self::default()
    }

    /// Peek at the stored checkpoint without synthesizing a default.
    pub fn snapshot(&self) -> Option<Checkpoint> {
        self.slot.read().expect("lock poisoned").clone()
    }
}

impl CheckpointStore for InMemoryCheckpointStore {
    fn load(&self) -> StoreResult<Checkpoint> {
        let mut slot = self.slot.write().expect("lock poisoned");
        match slot.as_ref() {
            Some(checkpoint) => Ok(checkpoint.clone()),
            None => {
                let checkpoint = Checkpoint::default();
                *slot = Some(checkpoint.clone());
                Ok(checkpoint)
            }
        }
    }

    fn save(&self, checkpoint: &Checkpoint) -> StoreResult<()> {
        *self.slot.write().expect("lock poisoned") = Some(checkpoint.clone());
        Ok(())
    }
}
