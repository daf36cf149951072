//! Public API surface for transform functions.
//!
//! - [`LaplaceTransform`]: trait callers implement (or satisfy with a closure)
//!   to describe `F(s)`.
//!
//! Convention: `F` is evaluated at the precision carried by its argument.
//! Arithmetic between a `DBig` argument and exact constants (`DBig::ONE`,
//! integers converted with `DBig::from`) keeps that precision, so a transform
//! written with plain operators never collapses to `f64` accuracy. Constants
//! that must be rounded (parsed decimals, transcendental values) should be
//! built at [`ambient_precision`](crate::inversion::core::precision::ambient_precision).

use dashu_float::DBig;

/// Laplace transform `F(s)` evaluable at arbitrary precision.
///
/// Required:
/// - `eval(&DBig) -> anyhow::Result<DBig>`: evaluate `F(s)` for real `s > 0`.
///   - Errors: return an error for poles, overflow or domain failures; the
///     inversion treats them as arithmetic failures of the Gaver order that
///     needed the sample.
///
/// Implementations must be pure and deterministic. Any
/// `Fn(&DBig) -> anyhow::Result<DBig>` implements this trait.
pub trait LaplaceTransform {
    fn eval(&self, s: &DBig) -> anyhow::Result<DBig>;
}

impl<F> LaplaceTransform for F
where
    F: Fn(&DBig) -> anyhow::Result<DBig>,
{
    fn eval(&self, s: &DBig) -> anyhow::Result<DBig> {
        self(s)
    }
}
