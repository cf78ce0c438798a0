use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wall-clock timing for one block-generation call.
///
/// Ephemeral: benchmarks are returned alongside the generated collection
/// and never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benchmark {
    /// When the generation loop started.
    pub begin: DateTime<Utc>,
    /// When the generation loop finished.
    pub end: DateTime<Utc>,
    /// `end - begin`.
    pub elapsed: Duration,
}

impl Benchmark {
    /// Build a benchmark from the two wall-clock instants around a
    /// generation loop. A non-monotonic clock (end before begin) yields a
    /// zero elapsed time rather than an error.
    pub fn new(begin: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let elapsed = (end - begin).to_std().unwrap_or_default();
        Self {
            begin,
            end,
            elapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn elapsed_is_end_minus_begin() {
        let begin = Utc.timestamp_opt(1_000, 0).unwrap();
        let end = Utc.timestamp_opt(1_002, 500_000_000).unwrap();
        let bench = Benchmark::new(begin, end);
        assert_eq!(bench.elapsed, Duration::from_millis(2500));
    }

    #[test]
    fn backwards_clock_yields_zero_elapsed() {
        let begin = Utc.timestamp_opt(2_000, 0).unwrap();
        let end = Utc.timestamp_opt(1_000, 0).unwrap();
        let bench = Benchmark::new(begin, end);
        assert_eq!(bench.elapsed, Duration::ZERO);
    }
}
