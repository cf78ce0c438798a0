//! Durable storage for PrimeBlock.
//!
//! Everything PrimeBlock puts on disk (the generation checkpoint and the
//! per-block prime files) flows through this crate, and ultimately
//! through a single primitive: [`LockedWriter`], an exclusive-advisory-lock
//! file writer with randomized backoff and a bounded deadline.
//!
//! # Components
//!
//! - [`LockedWriter`] — mutually-exclusive whole-file writes, safe against
//!   concurrent writers from other processes
//! - [`CheckpointStore`] — the checkpoint persistence boundary, with
//!   [`FileCheckpointStore`] (production) and [`InMemoryCheckpointStore`]
//!   (tests and embedding) implementations
//! - [`BlockPersister`] — serializes a finished block to its uniquely
//!   named, immutable file
//!
//! # Design Rules
//!
//! 1. A write either replaces the whole file or leaves it untouched:
//!    truncation happens only after the lock is held, so a timed-out
//!    writer never leaves an empty file behind.
//! 2. The checkpoint advances durably only through [`CheckpointStore::save`];
//!    a malformed-but-present checkpoint fails loudly instead of being
//!    coerced to defaults.
//! 3. Block files are immutable once written; uniqueness comes from the
//!    filename (timestamp, element count, last prime).
//! 4. All I/O errors are propagated, never silently ignored.

pub mod blocks;
pub mod checkpoint;
pub mod error;
pub mod memory;
pub mod traits;
pub mod writer;

pub use blocks::{
    block_filename, BlockPersister, BLOCK_FILE_EXTENSION, DEFAULT_BLOCK_DIRECTORY, PRIME_SEPARATOR,
};
pub use checkpoint::{FileCheckpointStore, DEFAULT_CHECKPOINT_PATH};
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryCheckpointStore;
pub use traits::CheckpointStore;
pub use writer::{LockedWriter, WriterConfig};
