//! Combinatorial cache — memoized factorials, binomials and Gaver coefficients.
//!
//! Purpose
//! -------
//! Supply the integer-valued factors of the Gaver functional (factorials,
//! binomial coefficients with and without alternating sign, and the
//! `(2n)! / (n·((n−1)!)²)` normalizer) as decimal big floats rounded to a
//! given working precision, computing each one at most once per precision.
//!
//! Key behaviors
//! -------------
//! - Compute every value exactly with `dashu-int` big integers and round it
//!   once into a `DBig` at the requested precision.
//! - Memoize per `(n, i, digits)` or `(n, digits)` so entries computed at one
//!   precision are never reused at another; stale entries are simply not
//!   looked up again.
//! - Provide [`CombinatorialCache::clear`] to release all entries.
//!
//! Invariants & assumptions
//! ------------------------
//! - All operations are pure functions of their arguments; the cache only
//!   changes speed, never results.
//! - Insertion is insert-or-ignore: if two callers race on the same key they
//!   compute the same value and whichever lands first is kept. The maps sit
//!   behind `parking_lot::RwLock`, so a shared `&CombinatorialCache` is
//!   `Sync`.
//! - `gaver_coefficient` requires `n ≥ 1`.

use std::collections::HashMap;
use std::hash::Hash;

use dashu_float::DBig;
use dashu_int::{IBig, UBig};
use parking_lot::RwLock;

use crate::inversion::core::precision::WorkingPrecision;

type PairKey = (usize, usize);
type TripleKey = (usize, usize, usize);

/// CombinatorialCache — per-precision memo of the Gaver integer factors.
///
/// Fields
/// ------
/// - `factorials`: `(n, digits) → n!`
/// - `binomials`: `(n, i, digits) → C(n, i)`
/// - `signed_binomials`: `(n, i, digits) → (−1)^i · C(n, i)`
/// - `gaver_coefficients`: `(n, digits) → (2n)! / (n·((n−1)!)²)`
#[derive(Debug, Default)]
pub struct CombinatorialCache {
    factorials: RwLock<HashMap<PairKey, DBig>>,
    binomials: RwLock<HashMap<TripleKey, DBig>>,
    signed_binomials: RwLock<HashMap<TripleKey, DBig>>,
    gaver_coefficients: RwLock<HashMap<PairKey, DBig>>,
}

impl CombinatorialCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// `n!` rounded to `precision`.
    pub fn factorial(&self, n: usize, precision: WorkingPrecision) -> DBig {
        memoized(&self.factorials, (n, precision.digits()), || {
            precision.round(DBig::from(factorial_exact(n)))
        })
    }

    /// `C(n, i)` rounded to `precision`; zero when `i > n`.
    pub fn binomial(&self, n: usize, i: usize, precision: WorkingPrecision) -> DBig {
        memoized(&self.binomials, (n, i, precision.digits()), || {
            precision.round(DBig::from(binomial_exact(n, i)))
        })
    }

    /// `(−1)^i · C(n, i)` rounded to `precision`.
    pub fn signed_binomial(&self, n: usize, i: usize, precision: WorkingPrecision) -> DBig {
        memoized(&self.signed_binomials, (n, i, precision.digits()), || {
            let magnitude = IBig::from(binomial_exact(n, i));
            let signed = if i % 2 == 0 { magnitude } else { -magnitude };
            precision.round(DBig::from(signed))
        })
    }

    /// `τ · (2n)! / (n·((n−1)!)²)` at `precision`.
    ///
    /// Only the τ-free integer factor is cached; `tau` multiplies the cached
    /// value on every call.
    pub fn gaver_coefficient(&self, n: usize, tau: &DBig, precision: WorkingPrecision) -> DBig {
        debug_assert!(n >= 1, "Gaver coefficient is defined for n ≥ 1");
        let factor = memoized(&self.gaver_coefficients, (n, precision.digits()), || {
            let lower = factorial_exact(n - 1);
            let exact = factorial_exact(2 * n) / (UBig::from(n) * &lower * &lower);
            precision.round(DBig::from(exact))
        });
        precision.round(factor * tau)
    }

    /// Drop every cached entry at every precision.
    pub fn clear(&self) {
        self.factorials.write().clear();
        self.binomials.write().clear();
        self.signed_binomials.write().clear();
        self.gaver_coefficients.write().clear();
    }

    /// Total number of cached entries across all tables.
    pub fn len(&self) -> usize {
        self.factorials.read().len()
            + self.binomials.read().len()
            + self.signed_binomials.read().len()
            + self.gaver_coefficients.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---- Helper Methods ----

fn memoized<K, F>(table: &RwLock<HashMap<K, DBig>>, key: K, compute: F) -> DBig
where
    K: Eq + Hash,
    F: FnOnce() -> DBig,
{
    if let Some(hit) = table.read().get(&key) {
        return hit.clone();
    }
    let value = compute();
    table.write().entry(key).or_insert(value).clone()
}

fn factorial_exact(n: usize) -> UBig {
    (2..=n).fold(UBig::ONE, |acc, k| acc * UBig::from(k))
}

fn binomial_exact(n: usize, i: usize) -> UBig {
    if i > n {
        return UBig::ZERO;
    }
    let i = i.min(n - i);
    // Each partial product is C(n, j + 1), so the division is exact.
    (0..i).fold(UBig::ONE, |acc, j| acc * UBig::from(n - j) / UBig::from(j + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Exact small values of factorials, binomials and signed binomials.
    // - The Gaver coefficient identity (2n)!/(n((n−1)!)²) = n·C(2n, n).
    // - Memoization keyed by precision and the `clear` operation.
    //
    // They intentionally DO NOT cover:
    // - Use of these factors inside the Gaver functional; see `gaver`.
    // -------------------------------------------------------------------------

    fn dbig(text: &str) -> DBig {
        DBig::from_str(text).expect("literal should parse")
    }

    #[test]
    // Purpose
    // -------
    // Verify small factorials and binomials against hand-computed values.
    //
    // Given
    // -----
    // - 5! and 0!, C(6, 2), C(6, 0), C(3, 5).
    //
    // Expect
    // ------
    // - 120, 1, 15, 1 and 0.
    fn factorial_and_binomial_match_known_values() {
        // Arrange
        let cache = CombinatorialCache::new();
        let p = WorkingPrecision::new(30);

        // Act / Assert
        assert_eq!(cache.factorial(5, p), dbig("120"));
        assert_eq!(cache.factorial(0, p), dbig("1"));
        assert_eq!(cache.binomial(6, 2, p), dbig("15"));
        assert_eq!(cache.binomial(6, 0, p), dbig("1"));
        assert_eq!(cache.binomial(3, 5, p), DBig::ZERO);
    }

    #[test]
    // Purpose
    // -------
    // Ensure signed binomials alternate sign with the lower index.
    //
    // Given
    // -----
    // - n = 4, i = 0..=4.
    //
    // Expect
    // ------
    // - 1, −4, 6, −4, 1.
    fn signed_binomial_alternates_sign() {
        // Arrange
        let cache = CombinatorialCache::new();
        let p = WorkingPrecision::new(20);
        let expected = ["1", "-4", "6", "-4", "1"];

        // Act / Assert
        for (i, want) in expected.iter().enumerate() {
            assert_eq!(cache.signed_binomial(4, i, p), dbig(want), "i = {i}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the Gaver coefficient against n·C(2n, n) with τ = 1 and τ = 0.5.
    //
    // Given
    // -----
    // - n = 1 → 2, n = 3 → 60, n = 5 → 1260.
    //
    // Expect
    // ------
    // - Exact matches for τ = 1; half the value for τ = 0.5.
    fn gaver_coefficient_equals_n_times_central_binomial() {
        // Arrange
        let cache = CombinatorialCache::new();
        let p = WorkingPrecision::new(40);
        let one = dbig("1");
        let half = dbig("0.5");

        // Act / Assert
        assert_eq!(cache.gaver_coefficient(1, &one, p), dbig("2"));
        assert_eq!(cache.gaver_coefficient(3, &one, p), dbig("60"));
        assert_eq!(cache.gaver_coefficient(5, &one, p), dbig("1260"));
        assert_eq!(cache.gaver_coefficient(5, &half, p), dbig("630"));
    }

    #[test]
    // Purpose
    // -------
    // Ensure entries are keyed by precision and that `clear` empties the cache.
    //
    // Given
    // -----
    // - The same binomial requested at 20 and at 40 digits, then `clear`.
    //
    // Expect
    // ------
    // - Two entries after both requests, repeated requests add none,
    //   zero entries after `clear`.
    fn entries_are_keyed_by_precision_and_cleared() {
        // Arrange
        let cache = CombinatorialCache::new();

        // Act
        let low = cache.binomial(10, 3, WorkingPrecision::new(20));
        let high = cache.binomial(10, 3, WorkingPrecision::new(40));
        let again = cache.binomial(10, 3, WorkingPrecision::new(20));

        // Assert
        assert_eq!(low, again);
        assert_eq!(low, high);
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    // Purpose
    // -------
    // Check that large factorials are rounded to the working precision
    // rather than stored with unlimited digits.
    //
    // Given
    // -----
    // - 30! (33 significant digits) requested at 10 digits.
    //
    // Expect
    // ------
    // - The cached value is within one unit of the 10th digit of 30!.
    fn factorial_is_rounded_to_requested_precision() {
        // Arrange
        let cache = CombinatorialCache::new();
        let p = WorkingPrecision::new(10);
        let exact = dbig("265252859812191058636308480000000");

        // Act
        let rounded = cache.factorial(30, p);

        // Assert
        let err = (exact - &rounded).to_f64().value().abs();
        assert!(err <= 1e23, "rounding error too large: {err}");
        assert!(rounded.precision() <= 10);
    }
}
