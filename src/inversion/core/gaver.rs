//! Gaver functionals — order-0 sequence of the GWR scheme.
//!
//! Purpose
//! -------
//! Sample a Laplace transform `F` on the arithmetic progression
//! `s_i = i·τ`, `τ = ln 2 / t`, and form the Gaver functionals
//!
//! ```text
//! G₀[n−1] = τ · (2n)! / (n·((n−1)!)²) · Σ_{i=0}^{n} (−1)^i C(n, i) F((n+i)·τ),   n = 1..M
//! ```
//!
//! which converge (slowly) to `f(t)` and seed the Wynn-rho accelerator.
//!
//! Key behaviors
//! -------------
//! - Draw samples lazily, in increasing index order, as each order needs them
//!   (order `n` reads samples `n..=2n`); nothing is sampled after the first
//!   failure.
//! - Treat a transform error or a non-finite sample/functional as an
//!   arithmetic failure of the order being evaluated.
//! - Failure at order 1 is fatal ([`GWRError::FirstOrderFailed`]); failure at
//!   order `n > 1` truncates the sequence to the `n − 1` valid orders.
//!
//! Invariants & assumptions
//! ------------------------
//! - `t` has been validated (`t > 0`, finite) and `order ≥ 1` by the caller.
//! - Every sample is re-rounded to the working precision, so user transforms
//!   returning exact or higher-precision values cannot widen the arithmetic.

use dashu_float::DBig;
use dashu_int::UBig;

use crate::inversion::{
    core::{combinatorics::CombinatorialCache, precision::WorkingPrecision},
    errors::{GWRError, GWRResult},
    traits::LaplaceTransform,
    validation::validate_order,
};

/// GaverSequence — the usable prefix of the order-0 Gaver sequence.
///
/// Fields
/// ------
/// - `values`: `Vec<DBig>`
///   Gaver functionals of orders `1..=usable_order()`. Never empty: both
///   constructors reject zero orders and order-1 failures.
/// - `requested_order`: `usize`
///   The `M` that was asked for.
/// - `failure`: `Option<String>`
///   Why generation stopped early, when it did.
#[derive(Debug, Clone, PartialEq)]
pub struct GaverSequence {
    values: Vec<DBig>,
    requested_order: usize,
    failure: Option<String>,
}

impl GaverSequence {
    /// Wrap precomputed functionals as a complete (untruncated) sequence.
    ///
    /// Errors
    /// ------
    /// - `GWRError::InvalidOrder` when `values` is empty.
    pub fn new(values: Vec<DBig>) -> GWRResult<Self> {
        validate_order(values.len())?;
        let requested_order = values.len();
        Ok(GaverSequence { values, requested_order, failure: None })
    }

    pub fn values(&self) -> &[DBig] {
        &self.values
    }

    pub fn into_values(self) -> Vec<DBig> {
        self.values
    }

    /// `M1`, the number of valid orders.
    pub fn usable_order(&self) -> usize {
        self.values.len()
    }

    pub fn requested_order(&self) -> usize {
        self.requested_order
    }

    pub fn is_truncated(&self) -> bool {
        self.values.len() < self.requested_order
    }

    /// Reason the sequence was truncated, if it was.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }
}

/// Abscissa step `τ = ln 2 / t` at `precision`.
pub fn abscissa_step(time: &DBig, precision: WorkingPrecision) -> DBig {
    let ln2 = precision.round(DBig::from(UBig::from(2u8))).ln();
    precision.round(ln2 / time)
}

/// Build the Gaver functionals of orders `1..=order` for `transform` at `time`.
///
/// Parameters
/// ----------
/// - `transform`: `&F`
///   Laplace transform evaluated at `s_i = i·τ`, `i = 1..=2·order`.
/// - `time`: `&DBig`
///   Time point `t > 0`.
/// - `order`: `usize`
///   Requested number of Gaver terms `M ≥ 1`.
/// - `precision`: `WorkingPrecision`
///   Digits used for every arithmetic step.
/// - `cache`: `&CombinatorialCache`
///   Source of binomials and Gaver coefficients.
///
/// Returns
/// -------
/// `GWRResult<GaverSequence>`
///   - `Ok` with `M1 = usable_order() ≤ order` valid functionals.
///   - `Err(GWRError::InvalidOrder)` when `order == 0`.
///   - `Err(GWRError::FirstOrderFailed)` when order 1 cannot be evaluated.
pub fn gaver_functionals<F>(
    transform: &F, time: &DBig, order: usize, precision: WorkingPrecision,
    cache: &CombinatorialCache,
) -> GWRResult<GaverSequence>
where
    F: LaplaceTransform + ?Sized,
{
    validate_order(order)?;
    let tau = abscissa_step(time, precision);
    let mut sampler = Sampler::new(transform, &tau, precision);
    let mut values = Vec::with_capacity(order);
    let mut failure = None;

    for n in 1..=order {
        match gaver_order(&mut sampler, n, &tau, precision, cache) {
            Ok(value) => values.push(value),
            Err(reason) if n == 1 => return Err(GWRError::FirstOrderFailed { reason }),
            Err(reason) => {
                tracing::warn!(
                    requested = order,
                    usable = n - 1,
                    %reason,
                    "Gaver sequence truncated"
                );
                failure = Some(reason);
                break;
            }
        }
    }

    Ok(GaverSequence { values, requested_order: order, failure })
}

// ---- Helper Methods ----

/// Samples `F(i·τ)` in index order; index 0 is the unused sentinel.
struct Sampler<'a, F: ?Sized> {
    transform: &'a F,
    tau: &'a DBig,
    precision: WorkingPrecision,
    samples: Vec<DBig>,
}

impl<'a, F> Sampler<'a, F>
where
    F: LaplaceTransform + ?Sized,
{
    fn new(transform: &'a F, tau: &'a DBig, precision: WorkingPrecision) -> Self {
        Sampler { transform, tau, precision, samples: vec![DBig::ZERO] }
    }

    /// Extend the samples through index `last`.
    fn ensure(&mut self, last: usize) -> Result<(), String> {
        while self.samples.len() <= last {
            let i = self.samples.len();
            let s = self.precision.round(DBig::from(UBig::from(i)) * self.tau);
            let value = self
                .transform
                .eval(&s)
                .map_err(|err| format!("transform failed at sample {i} (s = {s}): {err}"))?;
            if value.repr().is_infinite() {
                return Err(format!("transform returned a non-finite value at sample {i}"));
            }
            self.samples.push(self.precision.round(value));
        }
        Ok(())
    }

    fn get(&self, i: usize) -> &DBig {
        &self.samples[i]
    }
}

fn gaver_order<F>(
    sampler: &mut Sampler<'_, F>, n: usize, tau: &DBig, precision: WorkingPrecision,
    cache: &CombinatorialCache,
) -> Result<DBig, String>
where
    F: LaplaceTransform + ?Sized,
{
    sampler.ensure(2 * n)?;

    let mut sum = DBig::ZERO;
    for i in 0..=n {
        let term = cache.signed_binomial(n, i, precision) * sampler.get(n + i);
        sum = precision.round(sum + term);
    }
    let value = precision.round(cache.gaver_coefficient(n, tau, precision) * sum);
    if value.repr().is_infinite() {
        return Err(format!("Gaver functional of order {n} is not finite"));
    }
    Ok(value)
}
