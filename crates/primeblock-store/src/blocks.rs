use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use primeblock_types::{Checkpoint, PrimeCollection};
use tracing::debug;

use crate::error::StoreResult;
use crate::writer::LockedWriter;

/// Extension of every block file.
pub const BLOCK_FILE_EXTENSION: &str = "data";

/// Separator between primes in a block file.
pub const PRIME_SEPARATOR: char = ';';

/// Default block storage directory, relative to the working directory.
pub const DEFAULT_BLOCK_DIRECTORY: &str = "prime-blocks";

/// Serializes finished blocks into uniquely named, immutable files.
///
/// The persister owns a block until its write completes; afterwards the
/// file is a passive external artifact. It never touches the checkpoint:
/// advancing the checkpoint after a successful persist is the caller's
/// side of the commit protocol.
pub struct BlockPersister {
    directory: PathBuf,
    writer: LockedWriter,
}

impl BlockPersister {
    /// Persister writing into `directory` (created on first write).
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            writer: LockedWriter::new(),
        }
    }

    /// Persister with explicit writer tuning.
    pub fn with_writer(directory: impl Into<PathBuf>, writer: LockedWriter) -> Self {
        Self {
            directory: directory.into(),
            writer,
        }
    }

    /// The configured block storage directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Write `collection` as a block file and return its filename.
    ///
    /// The payload is the primes joined by `;` with no trailing separator;
    /// the name composes the current UTC minute, the element count, and
    /// the checkpoint's `last_prime`, so successive blocks never collide.
    /// On failure the error is returned and no state is mutated; the
    /// caller must not advance the checkpoint for a failed write.
    pub fn persist(
        &self,
        collection: &PrimeCollection,
        checkpoint: &Checkpoint,
    ) -> StoreResult<String> {
        let filename = block_filename(Utc::now(), collection.len(), &checkpoint.last_prime);
        let path = self.directory.join(&filename);
        self.writer
            .write(&path, collection.join(PRIME_SEPARATOR).as_bytes())?;
        debug!(filename = %filename, primes = collection.len(), "block persisted");
        Ok(filename)
    }
}

/// Compose the deterministic block filename:
/// `{YYYYMMDD-HHmm}-{element count}-{last prime}.data`.
pub fn block_filename(stamp: DateTime<Utc>, count: usize, last_prime: &BigUint) -> String {
    format!(
        "{}-{}-{}.{}",
        stamp.format("%Y%m%d-%H%M"),
        count,
        last_prime,
        BLOCK_FILE_EXTENSION
    )
}
