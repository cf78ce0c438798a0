use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::error::CheckpointFormatError;

/// Block size used when a checkpoint is created from scratch.
pub const DEFAULT_BLOCK_SIZE: u64 = 5000;

const KEY_LAST_PRIME: &str = "lastPrime";
const KEY_PRIME_COUNT: &str = "primeCount";
const KEY_BLOCK_SIZE: &str = "primeBlockSize";
const KEY_BLOCK_COUNT: &str = "primeBlockCount";

/// Durable record of generation progress and configuration.
///
/// Invariants:
/// - `last_prime` is always prime, or the seed value 2 before any
///   generation has happened.
/// - `prime_count` equals the total number of primes committed across all
///   persisted blocks; in-flight blocks are not counted until their file
///   is durably stored.
/// - `block_size` is strictly positive.
///
/// The checkpoint only advances durably through a completed, persisted
/// block; it is never deleted, only rewritten.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// The most recently generated prime (or the seed, 2).
    pub last_prime: BigUint,
    /// Total primes committed across all persisted blocks.
    pub prime_count: u64,
    /// Number of primes per block when no explicit size is requested.
    pub block_size: u64,
    /// Number of blocks persisted so far.
    pub block_count: u64,
}

impl Default for Checkpoint {
    fn default() -> Self {
        Self {
            last_prime: BigUint::from(2u32),
            prime_count: 0,
            block_size: DEFAULT_BLOCK_SIZE,
            block_count: 0,
        }
    }
}

impl Checkpoint {
    /// Encode as `key = value` lines in stable field order.
    ///
    /// This is the on-disk representation of the checkpoint resource. The
    /// order is not semantically significant but is kept stable for
    /// readability.
    pub fn encode(&self) -> String {
        format!(
            "{KEY_LAST_PRIME} = {}\n{KEY_PRIME_COUNT} = {}\n{KEY_BLOCK_SIZE} = {}\n{KEY_BLOCK_COUNT} = {}\n",
            self.last_prime, self.prime_count, self.block_size, self.block_count
        )
    }

    /// Parse the `key = value` representation produced by [`encode`].
    ///
    /// Unknown keys, duplicate keys, missing keys, non-decimal values, and
    /// a zero `primeBlockSize` all fail the parse; a present-but-malformed
    /// resource is never coerced to defaults.
    ///
    /// [`encode`]: Checkpoint::encode
    pub fn parse(text: &str) -> Result<Self, CheckpointFormatError> {
        let mut last_prime: Option<BigUint> = None;
        let mut prime_count: Option<u64> = None;
        let mut block_size: Option<u64> = None;
        let mut block_count: Option<u64> = None;

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let (key, value) = line
                .split_once('=')
                .ok_or(CheckpointFormatError::Syntax { line: index + 1 })?;
            let key = key.trim();
            let value = value.trim();
            match key {
                KEY_LAST_PRIME => {
                    let parsed = value.parse::<BigUint>().map_err(|_| invalid(KEY_LAST_PRIME, value))?;
                    set_once(&mut last_prime, KEY_LAST_PRIME, parsed)?;
                }
                KEY_PRIME_COUNT => {
                    set_once(&mut prime_count, KEY_PRIME_COUNT, parse_u64(KEY_PRIME_COUNT, value)?)?;
                }
                KEY_BLOCK_SIZE => {
                    set_once(&mut block_size, KEY_BLOCK_SIZE, parse_u64(KEY_BLOCK_SIZE, value)?)?;
                }
                KEY_BLOCK_COUNT => {
                    set_once(&mut block_count, KEY_BLOCK_COUNT, parse_u64(KEY_BLOCK_COUNT, value)?)?;
                }
                other => {
                    return Err(CheckpointFormatError::UnknownField {
                        field: other.to_string(),
                    });
                }
            }
        }

        let block_size = require(block_size, KEY_BLOCK_SIZE)?;
        if block_size == 0 {
            return Err(invalid(KEY_BLOCK_SIZE, "0"));
        }

        Ok(Self {
            last_prime: require(last_prime, KEY_LAST_PRIME)?,
            prime_count: require(prime_count, KEY_PRIME_COUNT)?,
            block_size,
            block_count: require(block_count, KEY_BLOCK_COUNT)?,
        })
    }
}

fn parse_u64(field: &'static str, value: &str) -> Result<u64, CheckpointFormatError> {
    value.parse::<u64>().map_err(|_| invalid(field, value))
}

fn invalid(field: &'static str, value: &str) -> CheckpointFormatError {
    CheckpointFormatError::InvalidValue {
        field,
        value: value.to_string(),
    }
}

fn set_once<T>(
    slot: &mut Option<T>,
    field: &'static str,
    value: T,
) -> Result<(), CheckpointFormatError> {
    if slot.is_some() {
        return Err(CheckpointFormatError::DuplicateField { field });
    }
    *slot = Some(value);
    Ok(())
}

fn require<T>(slot: Option<T>, field: &'static str) -> Result<T, CheckpointFormatError> {
    slot.ok_or(CheckpointFormatError::MissingField { field })
}
