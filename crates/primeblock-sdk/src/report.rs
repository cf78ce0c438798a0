use num_bigint::BigUint;
use primeblock_types::Benchmark;
use serde::{Deserialize, Serialize};

/// The result of one orchestrated generate-and-commit call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockReport {
    /// The smallest prime in the generated block.
    pub first_prime: BigUint,
    /// The largest prime in the generated block.
    pub last_prime: BigUint,
    /// Filename of the persisted block, when the write succeeded.
    pub filename: Option<String>,
    /// Wall-clock timing of the generation loop.
    pub benchmark: Benchmark,
    /// Whether the block reached durable storage. When `false`, the
    /// generated primes are retained in memory and persistence can be
    /// retried without re-generating.
    pub saved: bool,
}
