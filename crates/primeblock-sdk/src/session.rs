use num_bigint::BigUint;
use primeblock_engine::{BlockGenerator, PrimeSource, ProbabilisticPrimeSource};
use primeblock_store::{BlockPersister, CheckpointStore, FileCheckpointStore};
use primeblock_types::{Checkpoint, PrimeCollection};
use tracing::{debug, warn};

use crate::config::SessionConfig;
use crate::error::{SdkError, SdkResult};
use crate::report::BlockReport;

/// High-level PrimeBlock session.
///
/// Owns the loaded checkpoint, the checkpoint store, the block persister,
/// and the generator, and implements the commit protocol in this exact
/// order: generate, persist the block, and only on persisted success
/// increment `block_count` and save the checkpoint. A block-write failure
/// leaves the stored checkpoint at its last durable value so the block can
/// be safely regenerated, or re-persisted via [`retry_persist`] without
/// regeneration, since the generated primes stay in memory.
///
/// [`retry_persist`]: PrimeBlocks::retry_persist
pub struct PrimeBlocks<C = FileCheckpointStore, S = ProbabilisticPrimeSource>
where
    C: CheckpointStore,
    S: PrimeSource,
{
    checkpoint: Checkpoint,
    store: C,
    persister: BlockPersister,
    generator: BlockGenerator<S>,
    collection: PrimeCollection,
    /// Advanced-but-uncommitted checkpoint for a block whose write failed.
    pending: Option<Checkpoint>,
}

impl PrimeBlocks {
    /// Open a session with the default stack: the Baillie–PSW prime
    /// source (probed once; a missing primitive is fatal here, at
    /// startup) and file-backed storage at the configured paths.
    pub fn open(config: SessionConfig) -> SdkResult<Self> {
        let source = ProbabilisticPrimeSource::new()?;
        Self::with_parts(
            FileCheckpointStore::new(config.checkpoint_path),
            BlockPersister::new(config.block_directory),
            BlockGenerator::new(source),
        )
    }
}

impl<C, S> PrimeBlocks<C, S>
where
    C: CheckpointStore,
    S: PrimeSource,
{
    /// Assemble a session from explicit parts, loading the checkpoint (or
    /// creating and persisting the default on first run).
    pub fn with_parts(
        store: C,
        persister: BlockPersister,
        generator: BlockGenerator<S>,
    ) -> SdkResult<Self> {
        let checkpoint = store.load()?;
        Ok(Self {
            checkpoint,
            store,
            persister,
            generator,
            collection: PrimeCollection::new(),
            pending: None,
        })
    }

    /// Generate one block and run the commit protocol.
    ///
    /// The generator works on a scratch copy of the checkpoint, so a
    /// generation error leaves the session state untouched. After a
    /// successful persist, `block_count` is incremented and the advanced
    /// checkpoint is saved; only then does the session adopt it.
    ///
    /// A failed block write is not an error here: the report comes back
    /// with `saved: false`, the generated primes and the advanced
    /// checkpoint are retained as the pending block, and the stored
    /// checkpoint stays at its last durable value. A failed *checkpoint*
    /// write after a successful block write is
    /// [`SdkError::CheckpointOutOfSync`].
    pub fn generate_block(&mut self, requested: Option<u64>) -> SdkResult<BlockReport> {
        let mut scratch = self.checkpoint.clone();
        let (collection, benchmark) = self.generator.generate(&mut scratch, requested)?;
        self.collection = collection;
        self.pending = None;

        let first_prime = self
            .collection
            .first()
            .cloned()
            .unwrap_or_else(|| scratch.last_prime.clone());
        let last_prime = scratch.last_prime.clone();

        match self.persister.persist(&self.collection, &scratch) {
            Ok(filename) => {
                scratch.block_count += 1;
                self.commit(scratch, &filename)?;
                Ok(BlockReport {
                    first_prime,
                    last_prime,
                    filename: Some(filename),
                    benchmark,
                    saved: true,
                })
            }
            Err(err) => {
                warn!(error = %err, "block persistence failed; checkpoint not advanced");
                self.pending = Some(scratch);
                Ok(BlockReport {
                    first_prime,
                    last_prime,
                    filename: None,
                    benchmark,
                    saved: false,
                })
            }
        }
    }

    /// Retry persistence of the most recent unsaved block without
    /// re-generating it, completing the deferred checkpoint advancement
    /// on success.
    pub fn retry_persist(&mut self) -> SdkResult<String> {
        let pending = match &self.pending {
            Some(checkpoint) => checkpoint.clone(),
            None => return Err(SdkError::NoPendingBlock),
        };

        let filename = self.persister.persist(&self.collection, &pending)?;
        let mut advanced = pending;
        advanced.block_count += 1;
        self.commit(advanced, &filename)?;
        Ok(filename)
    }

    /// Save `advanced` as the new durable checkpoint and adopt it.
    ///
    /// At this point the block file already exists, so a save failure
    /// means disk and checkpoint disagree; the session still adopts the
    /// advanced state (memory reflects the durable block) and the
    /// mismatch is surfaced as [`SdkError::CheckpointOutOfSync`].
    fn commit(&mut self, advanced: Checkpoint, filename: &str) -> SdkResult<()> {
        let saved = self.store.save(&advanced);
        self.checkpoint = advanced;
        self.pending = None;
        match saved {
            Ok(()) => {
                debug!(
                    filename = %filename,
                    block_count = self.checkpoint.block_count,
                    prime_count = self.checkpoint.prime_count,
                    "block committed"
                );
                Ok(())
            }
            Err(source) => Err(SdkError::CheckpointOutOfSync {
                filename: filename.to_string(),
                source,
            }),
        }
    }

    /// The session's current checkpoint.
    pub fn checkpoint(&self) -> &Checkpoint {
        &self.checkpoint
    }

    /// The most recently generated collection.
    pub fn collection(&self) -> &PrimeCollection {
        &self.collection
    }

    /// Returns `true` if a generated block is awaiting persistence.
    pub fn has_pending_block(&self) -> bool {
        self.pending.is_some()
    }

    /// The largest prime generated so far (durable or pending).
    pub fn last_prime(&self) -> &BigUint {
        match &self.pending {
            Some(pending) => &pending.last_prime,
            None => &self.checkpoint.last_prime,
        }
    }
}
