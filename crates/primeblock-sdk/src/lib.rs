//! High-level PrimeBlock API.
//!
//! [`PrimeBlocks`] binds the block generator to durable storage and
//! implements the commit protocol: generate, persist the block, and only
//! after the block is durably stored advance and save the checkpoint. A
//! failed block write therefore costs at most one block's worth of
//! regeneration: the checkpoint on disk always names a state from which
//! generation can safely resume.
//!
//! ```no_run
//! use primeblock_sdk::{PrimeBlocks, SessionConfig};
//!
//! let mut session = PrimeBlocks::open(SessionConfig::default())?;
//! let report = session.generate_block(None)?;
//! if report.saved {
//!     println!("block {} written", report.filename.unwrap());
//! }
//! # Ok::<(), primeblock_sdk::SdkError>(())
//! ```

pub mod config;
pub mod error;
pub mod report;
pub mod session;

pub use config::SessionConfig;
pub use error::{SdkError, SdkResult};
pub use report::BlockReport;
pub use session::PrimeBlocks;
