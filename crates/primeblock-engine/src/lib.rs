//! Block generation engine for PrimeBlock.
//!
//! This crate turns the arbitrary-precision next-prime primitive into
//! whole blocks of primes. It knows nothing about persistence: the
//! generator advances an in-memory [`Checkpoint`] and returns the
//! accumulated collection, and the caller decides whether that progress
//! ever becomes durable (the generate-then-commit separation the commit
//! protocol depends on).
//!
//! # Key Types
//!
//! - [`PrimeSource`] — the seam around the next-prime primitive
//! - [`ProbabilisticPrimeSource`] — the default source, backed by
//!   `num-prime`'s strengthened Baillie–PSW test
//! - [`BlockGenerator`] — drives the source `block_size` times and reports
//!   timing
//!
//! [`Checkpoint`]: primeblock_types::Checkpoint

pub mod error;
pub mod generator;
pub mod source;

pub use error::{EngineError, EngineResult};
pub use generator::BlockGenerator;
pub use source::{PrimeSource, ProbabilisticPrimeSource};
