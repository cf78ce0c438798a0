use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Ordered primes accumulated during one block-generation call.
///
/// Invariants: elements are strictly increasing and each is prime. Both are
/// guaranteed by the generator (the next-prime primitive only moves
/// forward), so the normal [`push`] path appends without scanning. A fresh
/// collection is produced for every generation call; collections are never
/// reused across calls.
///
/// [`push`]: PrimeCollection::push
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimeCollection {
    primes: Vec<BigUint>,
}

impl PrimeCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty collection with room for `capacity` primes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            primes: Vec::with_capacity(capacity),
        }
    }

    /// Number of primes collected.
    pub fn len(&self) -> usize {
        self.primes.len()
    }

    /// Returns `true` if nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    /// The smallest (first-generated) prime, if any.
    pub fn first(&self) -> Option<&BigUint> {
        self.primes.first()
    }

    /// The largest (most recently generated) prime, if any.
    pub fn last(&self) -> Option<&BigUint> {
        self.primes.last()
    }

    /// Append a prime. O(1); relies on the generator's monotonicity.
    pub fn push(&mut self, prime: BigUint) {
        self.primes.push(prime);
    }

    /// Append `prime` only if it is not already present.
    ///
    /// Performs a linear membership scan before appending, so each
    /// insertion is O(n). Diagnostic use only; [`push`] is the normal
    /// path. Returns `true` if the prime was appended.
    ///
    /// [`push`]: PrimeCollection::push
    pub fn push_checked(&mut self, prime: BigUint) -> bool {
        if self.primes.contains(&prime) {
            return false;
        }
        self.primes.push(prime);
        true
    }

    /// Remove all collected primes, keeping the allocation.
    pub fn clear(&mut self) {
        self.primes.clear();
    }

    /// Iterate over the collected primes in generation order.
    pub fn iter(&self) -> std::slice::Iter<'_, BigUint> {
        self.primes.iter()
    }

    /// View the collected primes as a slice.
    pub fn as_slice(&self) -> &[BigUint] {
        &self.primes
    }

    /// Render the primes as decimal integers joined by `separator`.
    ///
    /// No trailing separator, no header, no trailing newline; this is the
    /// block file payload.
    pub fn join(&self, separator: char) -> String {
        let mut out = String::new();
        for (i, prime) in self.primes.iter().enumerate() {
            if i > 0 {
                out.push(separator);
            }
            out.push_str(&prime.to_string());
        }
        out
    }
}

impl<'a> IntoIterator for &'a PrimeCollection {
    type Item = &'a BigUint;
    type IntoIter = std::slice::Iter<'a, BigUint>;

    fn into_iter(self) -> Self::IntoIter {
        self.primes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: u32) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn push_preserves_order() {
        let mut collection = PrimeCollection::new();
        collection.push(big(3));
        collection.push(big(5));
        collection.push(big(7));
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.first(), Some(&big(3)));
        assert_eq!(collection.last(), Some(&big(7)));
    }

    #[test]
    fn push_checked_rejects_duplicates() {
        let mut collection = PrimeCollection::new();
        assert!(collection.push_checked(big(3)));
        assert!(collection.push_checked(big(5)));
        assert!(!collection.push_checked(big(3)));
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn join_has_no_trailing_separator() {
        let mut collection = PrimeCollection::new();
        collection.push(big(3));
        collection.push(big(5));
        collection.push(big(7));
        assert_eq!(collection.join(';'), "3;5;7");
    }

    #[test]
    fn join_of_empty_collection() {
        assert_eq!(PrimeCollection::new().join(';'), "");
    }

    #[test]
    fn join_of_single_element() {
        let mut collection = PrimeCollection::new();
        collection.push(big(2));
        assert_eq!(collection.join(';'), "2");
    }

    #[test]
    fn clear_empties_collection() {
        let mut collection = PrimeCollection::with_capacity(4);
        collection.push(big(11));
        collection.clear();
        assert!(collection.is_empty());
        assert_eq!(collection.first(), None);
    }

    #[test]
    fn iteration_in_generation_order() {
        let mut collection = PrimeCollection::new();
        collection.push(big(3));
        collection.push(big(5));
        let seen: Vec<u32> = collection
            .iter()
            .map(|p| p.to_string().parse().unwrap())
            .collect();
        assert_eq!(seen, vec![3, 5]);
    }
}
