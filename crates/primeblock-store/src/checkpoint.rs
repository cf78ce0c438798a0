use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use primeblock_types::Checkpoint;
use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::traits::CheckpointStore;
use crate::writer::LockedWriter;

/// Default location of the checkpoint resource, relative to the working
/// directory.
pub const DEFAULT_CHECKPOINT_PATH: &str = "prime-checkpoint.ini";

/// File-backed checkpoint store.
///
/// The checkpoint is a small `key = value` text file (see
/// [`Checkpoint::encode`]). Writes go through [`LockedWriter`], so a
/// concurrent reader or writer in another process never observes a
/// half-written file.
pub struct FileCheckpointStore {
    path: PathBuf,
    writer: LockedWriter,
}

impl FileCheckpointStore {
    /// Store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: LockedWriter::new(),
        }
    }

    /// Store with explicit writer tuning.
    pub fn with_writer(path: impl Into<PathBuf>, writer: LockedWriter) -> Self {
        Self {
            path: path.into(),
            writer,
        }
    }

    /// Path of the checkpoint resource.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CheckpointStore for FileCheckpointStore {
    fn load(&self) -> StoreResult<Checkpoint> {
        match fs::read_to_string(&self.path) {
            Ok(text) => {
                Checkpoint::parse(&text).map_err(|source| StoreError::MalformedCheckpoint {
                    path: self.path.clone(),
                    source,
                })
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                let checkpoint = Checkpoint::default();
                self.save(&checkpoint)?;
                info!(path = %self.path.display(), "created default checkpoint");
                Ok(checkpoint)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, checkpoint: &Checkpoint) -> StoreResult<()> {
        self.writer.write(&self.path, checkpoint.encode().as_bytes())
    }
}
