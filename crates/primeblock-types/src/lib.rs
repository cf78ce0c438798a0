//! Foundation types for PrimeBlock.
//!
//! This crate provides the value types shared by every other PrimeBlock
//! crate: the durable generation checkpoint, the per-block prime
//! collection, and the ephemeral benchmark record.
//!
//! # Key Types
//!
//! - [`Checkpoint`] — durable record of generation progress and
//!   configuration, with its `key = value` wire codec
//! - [`PrimeCollection`] — ordered primes accumulated during one
//!   block-generation call
//! - [`Benchmark`] — wall-clock timing for one generation call
//! - [`CheckpointFormatError`] — parse failures for the checkpoint codec

pub mod benchmark;
pub mod checkpoint;
pub mod collection;
pub mod error;

pub use benchmark::Benchmark;
pub use checkpoint::{Checkpoint, DEFAULT_BLOCK_SIZE};
pub use collection::PrimeCollection;
pub use error::CheckpointFormatError;
