//! inversion::inverter — GWR dispatcher for scalar and batched time points.
//!
//! Purpose
//! -------
//! Orchestrate one numerical Laplace inversion: validate inputs, activate
//! the working precision, build the Gaver sequence, accelerate it with
//! Wynn-rho and restore the ambient precision. A batch front end applies
//! the scalar inversion to every time point of a scalar or 1-D array.
//!
//! Key behaviors
//! -------------
//! - [`GWRInverter`] owns its [`GWROptions`] and a [`CombinatorialCache`]
//!   that is reused across calls (and across time points of a batch).
//! - [`GWRInverter::invert`] returns an [`InversionOutcome`] carrying the
//!   estimate together with the usable order `M1`, the precision used and
//!   any extrapolation breakdown, instead of hiding degeneracies.
//! - [`GWRInverter::invert_batch`] validates the whole input before the
//!   first inversion and returns values in the squeezed input shape.
//! - [`gwr`] is a one-shot convenience mirroring `gwr(F, t, M, precin)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Fatal failures (invalid input, failure at Gaver order 1) are returned as
//!   [`GWRError`]; truncation and breakdown are reported in the outcome.
//! - The ambient precision is restored on every exit path because the
//!   precision guard lives on the stack of `invert`.
//! - Time points are independent: no state other than the cache carries from
//!   one point to the next, and batches are evaluated sequentially.
//!
//! Testing notes
//! -------------
//! - Unit tests cover known transform pairs, the degenerate `M = 1` case,
//!   precision restoration on success and failure, cache-order independence
//!   and batch shape handling. End-to-end scenarios live in
//!   `tests/integration_gwr_pipeline.rs`.

use dashu_float::DBig;
use ndarray::{ArrayBase, ArrayD, Data, Dimension, IxDyn};

use crate::{
    inversion::{
        core::{
            combinatorics::CombinatorialCache,
            gaver::gaver_functionals,
            options::{BreakdownPolicy, GWROptions},
            precision::{MACHINE_PRECISION, WorkingPrecision, set_precision},
            wynn::{Breakdown, wynn_rho},
        },
        errors::GWRResult,
        traits::LaplaceTransform,
        validation::{squeeze_time_shape, validate_order, validate_time, validate_time_f64},
    },
    utils::decimal_from_f64,
};

/// Whether the full requested order was usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InversionStatus {
    /// All `M` Gaver functionals were computed.
    Complete,
    /// Generation stopped early; only `usable_order < M` orders were used.
    Truncated { usable_order: usize },
}

/// InversionOutcome — estimate of `f(t)` plus diagnostics.
///
/// Fields
/// ------
/// - `value`: `DBig`
///   Best Wynn-rho estimate at the working precision.
/// - `requested_order` / `usable_order`: `usize`
///   `M` and `M1 ≤ M`.
/// - `precision`: [`WorkingPrecision`]
///   Digits the call ran at.
/// - `orders_completed`: `usize`
///   Wynn-rho orders computed before the loop ended.
/// - `breakdown`: `Option<Breakdown>`
///   First extrapolation breakdown, if any.
/// - `truncation`: `Option<String>`
///   Reason the Gaver sequence was truncated, if it was.
///
/// Invariants
/// ----------
/// - `1 ≤ usable_order ≤ requested_order`.
/// - `truncation.is_some()` iff `usable_order < requested_order`.
#[derive(Debug, Clone, PartialEq)]
pub struct InversionOutcome {
    value: DBig,
    requested_order: usize,
    usable_order: usize,
    precision: WorkingPrecision,
    orders_completed: usize,
    breakdown: Option<Breakdown>,
    truncation: Option<String>,
}

impl InversionOutcome {
    pub fn value(&self) -> &DBig {
        &self.value
    }

    pub fn into_value(self) -> DBig {
        self.value
    }

    pub fn requested_order(&self) -> usize {
        self.requested_order
    }

    /// `M1`, the number of Gaver functionals that fed the accelerator.
    pub fn usable_order(&self) -> usize {
        self.usable_order
    }

    pub fn precision(&self) -> WorkingPrecision {
        self.precision
    }

    pub fn orders_completed(&self) -> usize {
        self.orders_completed
    }

    pub fn breakdown(&self) -> Option<Breakdown> {
        self.breakdown
    }

    pub fn truncation_reason(&self) -> Option<&str> {
        self.truncation.as_deref()
    }

    pub fn status(&self) -> InversionStatus {
        if self.usable_order < self.requested_order {
            InversionStatus::Truncated { usable_order: self.usable_order }
        } else {
            InversionStatus::Complete
        }
    }
}

/// GWRInverter — reusable Gaver–Wynn-rho inversion engine.
///
/// Parameters
/// ----------
/// Constructed via [`GWRInverter::new`] (fresh cache) or
/// [`GWRInverter::with_cache`] (injected cache).
///
/// Performance
/// -----------
/// - The cache grows with `O(M²)` binomial entries per distinct precision.
///   Call [`GWRInverter::clear_cache`] when switching precision regimes in a
///   long-running process.
/// - `GWRInverter` is `Sync`; a shared reference may be used from several
///   threads, each inversion running with its own precision.
#[derive(Debug, Default)]
pub struct GWRInverter {
    options: GWROptions,
    cache: CombinatorialCache,
}

impl GWRInverter {
    pub fn new(options: GWROptions) -> Self {
        GWRInverter { options, cache: CombinatorialCache::new() }
    }

    pub fn with_cache(options: GWROptions, cache: CombinatorialCache) -> Self {
        GWRInverter { options, cache }
    }

    pub fn options(&self) -> &GWROptions {
        &self.options
    }

    pub fn cache(&self) -> &CombinatorialCache {
        &self.cache
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Invert `transform` at the time point `time`.
    ///
    /// Parameters
    /// ----------
    /// - `transform`: `&F`
    ///   Laplace transform `F(s)`, evaluated at `s = i·ln2/t`, `i = 1..=2M`.
    /// - `time`: `&DBig`
    ///   Time point `t > 0`.
    ///
    /// Returns
    /// -------
    /// `GWRResult<InversionOutcome>`
    ///   - `Ok` with the best estimate of `f(t)` and diagnostics.
    ///   - `Err(GWRError::InvalidTime | InvalidOrder)` for invalid input.
    ///   - `Err(GWRError::FirstOrderFailed)` if the transform fails on its
    ///     first two samples.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use dashu_float::DBig;
    /// use rust_laplace::inversion::{GWRInverter, GWROptions};
    ///
    /// let inverter = GWRInverter::new(GWROptions::with_order(16).unwrap());
    /// let step = |s: &DBig| -> anyhow::Result<DBig> { Ok(DBig::ONE / s) };
    /// let outcome = inverter.invert(&step, &DBig::ONE).unwrap();
    /// assert!((outcome.value().to_f64().value() - 1.0).abs() < 1e-10);
    /// ```
    pub fn invert<F>(&self, transform: &F, time: &DBig) -> GWRResult<InversionOutcome>
    where
        F: LaplaceTransform + ?Sized,
    {
        let order = self.options.order;
        validate_order(order)?;
        validate_time(time)?;

        let guard =
            set_precision(order, self.options.precision_override, self.options.precision_floor);
        let precision = guard.active();

        let sequence = gaver_functionals(transform, time, order, precision, &self.cache)?;
        let usable_order = sequence.usable_order();
        let truncation = sequence.failure().map(str::to_string);
        let accelerated = wynn_rho(sequence, self.options.breakdown, precision);
        drop(guard);

        Ok(InversionOutcome {
            value: accelerated.value,
            requested_order: order,
            usable_order,
            precision,
            orders_completed: accelerated.orders_completed,
            breakdown: accelerated.breakdown,
            truncation,
        })
    }

    /// Invert at an `f64` time point (converted exactly from its decimal form).
    pub fn invert_f64<F>(&self, transform: &F, time: f64) -> GWRResult<InversionOutcome>
    where
        F: LaplaceTransform + ?Sized,
    {
        validate_time_f64(time)?;
        let time = decimal_from_f64(time)?;
        self.invert(transform, &time)
    }

    /// Invert at every time point of a scalar or vector of times.
    ///
    /// Parameters
    /// ----------
    /// - `transform`: `&F`
    /// - `times`: `&ArrayBase<S, D>`
    ///   Time points; any dimensionality whose non-unit axes number at most
    ///   one. All values must be finite and `> 0`.
    ///
    /// Returns
    /// -------
    /// `GWRResult<ArrayD<DBig>>`
    ///   Estimates in logical (row-major) order of `times`, shaped as the
    ///   squeezed input: rank 0 for a single time, rank 1 otherwise.
    ///
    /// Errors
    /// ------
    /// - `GWRError::InvalidTimeShape` for rank ≥ 2 inputs.
    /// - `GWRError::InvalidTime` if any time is invalid; nothing is inverted.
    /// - Any error of [`GWRInverter::invert`] for the first failing point.
    pub fn invert_batch<F, S, D>(
        &self, transform: &F, times: &ArrayBase<S, D>,
    ) -> GWRResult<ArrayD<DBig>>
    where
        F: LaplaceTransform + ?Sized,
        S: Data<Elem = f64>,
        D: Dimension,
    {
        let shape = squeeze_time_shape(times.shape())?;
        validate_order(self.options.order)?;
        let decimals = times
            .iter()
            .map(|&t| validate_time_f64(t).and_then(|()| decimal_from_f64(t)))
            .collect::<GWRResult<Vec<DBig>>>()?;

        let values = decimals
            .iter()
            .map(|t| self.invert(transform, t).map(InversionOutcome::into_value))
            .collect::<GWRResult<Vec<DBig>>>()?;

        Ok(ArrayD::from_shape_vec(IxDyn(&shape), values)?)
    }
}

/// One-shot inversion with `order` Gaver terms.
///
/// `precision_override = 0` derives `round(2.1 · order)` digits (floored at
/// [`MACHINE_PRECISION`]). Use [`DEFAULT_ORDER`](crate::inversion::DEFAULT_ORDER)
/// for the customary `M = 32`.
///
/// Examples
/// --------
/// ```rust
/// use dashu_float::DBig;
/// use rust_laplace::inversion::{DEFAULT_ORDER, gwr};
///
/// let decay = |s: &DBig| -> anyhow::Result<DBig> { Ok(DBig::ONE / (s + DBig::ONE)) };
/// let f5 = gwr(&decay, 5.0, DEFAULT_ORDER, 0).unwrap();
/// assert!((f5.to_f64().value() - (-5.0_f64).exp()).abs() < 1e-12);
/// ```
pub fn gwr<F>(transform: &F, time: f64, order: usize, precision_override: usize) -> GWRResult<DBig>
where
    F: LaplaceTransform + ?Sized,
{
    let options =
        GWROptions::new(order, precision_override, MACHINE_PRECISION, BreakdownPolicy::default())?;
    GWRInverter::new(options).invert_f64(transform, time).map(InversionOutcome::into_value)
}
