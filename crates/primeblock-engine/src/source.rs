use num_bigint::BigUint;
use num_prime::nt_funcs;

use crate::error::{EngineError, EngineResult};

/// Produces the smallest prime strictly greater than a given value.
///
/// This is the seam around the arbitrary-precision primality primitive.
/// Implementations must be deterministic and side-effect-free: the same
/// input always yields the same prime. The generator relies on the strict
/// monotonic increase this contract guarantees; it is what makes
/// duplicates in a block structurally impossible.
pub trait PrimeSource: Send + Sync {
    /// The smallest prime strictly greater than `n`.
    fn next_after(&self, n: &BigUint) -> EngineResult<BigUint>;
}

/// Default prime source, backed by `num-prime`'s strengthened Baillie–PSW
/// primality test over `BigUint`.
#[derive(Clone, Copy, Debug)]
pub struct ProbabilisticPrimeSource;

impl ProbabilisticPrimeSource {
    /// Construct the source, probing the primitive once.
    ///
    /// The probe asks for the prime after 2 and requires 3; anything else
    /// means the runtime's next-prime capability is broken, which is
    /// fatal at startup rather than discoverable mid-block.
    pub fn new() -> EngineResult<Self> {
        let source = Self;
        let probe = source.next_after(&BigUint::from(2u32))?;
        if probe != BigUint::from(3u32) {
            return Err(EngineError::MissingCapability(format!(
                "next-prime self-check returned {probe}, expected 3"
            )));
        }
        Ok(source)
    }
}

impl PrimeSource for ProbabilisticPrimeSource {
    fn next_after(&self, n: &BigUint) -> EngineResult<BigUint> {
        nt_funcs::next_prime(n, None)
            .ok_or_else(|| EngineError::MissingCapability(format!("no prime found after {n}")))
    }
}
