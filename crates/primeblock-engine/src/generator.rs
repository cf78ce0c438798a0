use chrono::Utc;
use primeblock_types::{Benchmark, Checkpoint, PrimeCollection};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::source::PrimeSource;

/// Drives the next-prime primitive to fill one block.
///
/// `generate` advances the checkpoint **in memory only**. Whether that
/// progress becomes durable is the caller's decision after the block has
/// been persisted; the generator itself never touches storage.
pub struct BlockGenerator<S: PrimeSource> {
    source: S,
    check_duplicates: bool,
}

impl<S: PrimeSource> BlockGenerator<S> {
    /// Generator over the given source, duplicate checking off.
    pub fn new(source: S) -> Self {
        Self {
            source,
            check_duplicates: false,
        }
    }

    /// Enable the linear membership scan before each append.
    ///
    /// O(n) per insertion. The source's monotonicity makes duplicates
    /// structurally impossible, so this mode exists for diagnostics only
    /// and is off by default.
    pub fn with_duplicate_check(mut self, enabled: bool) -> Self {
        self.check_duplicates = enabled;
        self
    }

    /// Generate one block of primes, advancing `checkpoint` in memory.
    ///
    /// The effective size is `requested` when provided and positive,
    /// otherwise `checkpoint.block_size`; a zero effective size fails with
    /// [`EngineError::InvalidConfiguration`] before anything is generated.
    /// Exactly `size` primes are pulled from the source; each one advances
    /// `last_prime` and `prime_count` and is appended to a fresh
    /// [`PrimeCollection`]. Wall-clock timing around the loop is returned
    /// as a [`Benchmark`].
    pub fn generate(
        &self,
        checkpoint: &mut Checkpoint,
        requested: Option<u64>,
    ) -> EngineResult<(PrimeCollection, Benchmark)> {
        let size = requested
            .filter(|&n| n > 0)
            .unwrap_or(checkpoint.block_size);
        if size == 0 {
            return Err(EngineError::InvalidConfiguration(
                "block size must be positive".into(),
            ));
        }

        let mut collection = PrimeCollection::with_capacity(size as usize);
        let begin = Utc::now();
        for _ in 0..size {
            let next = self.source.next_after(&checkpoint.last_prime)?;
            checkpoint.last_prime = next.clone();
            checkpoint.prime_count += 1;
            if self.check_duplicates {
                collection.push_checked(next);
            } else {
                collection.push(next);
            }
        }
        let end = Utc::now();

        let benchmark = Benchmark::new(begin, end);
        debug!(primes = collection.len(), elapsed = ?benchmark.elapsed, "block generated");
        Ok((collection, benchmark))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ProbabilisticPrimeSource;
    use num_bigint::BigUint;

    fn generator() -> BlockGenerator<ProbabilisticPrimeSource> {
        BlockGenerator::new(ProbabilisticPrimeSource::new().unwrap())
    }

    fn as_u64s(collection: &PrimeCollection) -> Vec<u64> {
        collection
            .iter()
            .map(|p| p.to_string().parse().unwrap())
            .collect()
    }

    #[test]
    fn block_of_five_from_seed() {
        let mut checkpoint = Checkpoint {
            block_size: 5,
            ..Checkpoint::default()
        };
        let (collection, _) = generator().generate(&mut checkpoint, None).unwrap();

        assert_eq!(as_u64s(&collection), vec![3, 5, 7, 11, 13]);
        assert_eq!(checkpoint.last_prime, BigUint::from(13u32));
        assert_eq!(checkpoint.prime_count, 5);
        // The generator leaves block accounting to the commit protocol.
        assert_eq!(checkpoint.block_count, 0);
    }

    #[test]
    fn requested_size_overrides_checkpoint() {
        let mut checkpoint = Checkpoint::default();
        let (collection, _) = generator().generate(&mut checkpoint, Some(3)).unwrap();
        assert_eq!(as_u64s(&collection), vec![3, 5, 7]);
        assert_eq!(checkpoint.prime_count, 3);
    }

    #[test]
    fn zero_request_falls_back_to_checkpoint_size() {
        let mut checkpoint = Checkpoint {
            block_size: 2,
            ..Checkpoint::default()
        };
        let (collection, _) = generator().generate(&mut checkpoint, Some(0)).unwrap();
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn zero_effective_size_fails_without_generating() {
        let mut checkpoint = Checkpoint {
            block_size: 0,
            ..Checkpoint::default()
        };
        let before = checkpoint.clone();
        let err = generator().generate(&mut checkpoint, None).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfiguration(_)));
        assert_eq!(checkpoint, before);
    }

    #[test]
    fn consecutive_blocks_continue_the_sequence() {
        let mut checkpoint = Checkpoint {
            block_size: 4,
            ..Checkpoint::default()
        };
        let (first, _) = generator().generate(&mut checkpoint, None).unwrap();
        let (second, _) = generator().generate(&mut checkpoint, None).unwrap();

        assert_eq!(as_u64s(&first), vec![3, 5, 7, 11]);
        assert_eq!(as_u64s(&second), vec![13, 17, 19, 23]);
        assert_eq!(checkpoint.prime_count, 8);
    }

    #[test]
    fn duplicate_check_mode_produces_identical_blocks() {
        let mut plain = Checkpoint {
            block_size: 10,
            ..Checkpoint::default()
        };
        let mut checked = plain.clone();

        let (a, _) = generator().generate(&mut plain, None).unwrap();
        let (b, _) = generator()
            .with_duplicate_check(true)
            .generate(&mut checked, None)
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(plain, checked);
    }

    #[test]
    fn sequence_is_strictly_increasing() {
        let mut checkpoint = Checkpoint {
            block_size: 64,
            ..Checkpoint::default()
        };
        let (collection, _) = generator().generate(&mut checkpoint, None).unwrap();
        let primes = as_u64s(&collection);
        for window in primes.windows(2) {
            assert!(window[0] < window[1]);
        }
        assert_eq!(collection.last(), Some(&checkpoint.last_prime));
    }

    #[test]
    fn benchmark_brackets_the_loop() {
        let mut checkpoint = Checkpoint {
            block_size: 8,
            ..Checkpoint::default()
        };
        let (_, benchmark) = generator().generate(&mut checkpoint, None).unwrap();
        assert!(benchmark.begin <= benchmark.end);
    }
}
