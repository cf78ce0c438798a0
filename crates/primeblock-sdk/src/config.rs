use std::path::PathBuf;

use primeblock_store::{DEFAULT_BLOCK_DIRECTORY, DEFAULT_CHECKPOINT_PATH};

/// Configuration for a PrimeBlock session.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Path of the checkpoint resource.
    pub checkpoint_path: PathBuf,
    /// Directory receiving the block files (created on first write).
    pub block_directory: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            checkpoint_path: PathBuf::from(DEFAULT_CHECKPOINT_PATH),
            block_directory: PathBuf::from(DEFAULT_BLOCK_DIRECTORY),
        }
    }
}
