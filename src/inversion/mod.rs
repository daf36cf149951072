//! inversion — numerical Laplace inversion by Gaver–Wynn-rho (GWR).
//!
//! Purpose
//! -------
//! Recover `f(t)` from a Laplace transform `F(s)` that can be evaluated at
//! arbitrary precision, without a closed-form inverse. The Gaver functionals
//! of `F` at `t` form a sequence converging to `f(t)`; the Wynn-rho scheme
//! accelerates it to a high-accuracy estimate.
//!
//! Key behaviors
//! -------------
//! - Describe transforms through [`LaplaceTransform`] (closures
//!   `Fn(&DBig) -> anyhow::Result<DBig>` qualify).
//! - Configure an inversion with [`GWROptions`] (`M`, precision override and
//!   floor, [`BreakdownPolicy`]).
//! - Run single and batched inversions with [`GWRInverter`], or one-shot
//!   with [`gwr`].
//! - Report fatal failures through [`GWRError`] / [`GWRResult`] and
//!   non-fatal degradation through [`InversionOutcome`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `t > 0` and `M ≥ 1`; violations are rejected before any sampling.
//! - Working precision defaults to `round(2.1·M)` digits (67 for `M = 32`),
//!   never below [`MACHINE_PRECISION`] unless the floor is disabled.
//! - The transform must not round internally to `f64`; precision lost inside
//!   `F` cannot be recovered by acceleration.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use dashu_float::DBig;
//!   use rust_laplace::inversion::{GWRInverter, GWROptions, GWRResult};
//!
//!   fn ramp_at(t: f64) -> GWRResult<f64> {
//!       let ramp = |s: &DBig| -> anyhow::Result<DBig> { Ok(DBig::ONE / (s * s)) };
//!       let inverter = GWRInverter::new(GWROptions::default());
//!       Ok(inverter.invert_f64(&ramp, t)?.value().to_f64().value())
//!   }
//!   # assert!((ramp_at(2.0).unwrap() - 2.0).abs() < 1e-10);
//!   ```
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each component; `tests/integration_gwr_pipeline.rs`
//!   checks reference transform pairs end to end.

pub mod core;
pub mod errors;
pub mod inverter;
pub mod traits;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::combinatorics::CombinatorialCache;
pub use self::core::options::{BreakdownPolicy, DEFAULT_ORDER, GWROptions};
pub use self::core::precision::{
    MACHINE_PRECISION, PrecisionGuard, WorkingPrecision, ambient_precision, set_precision,
};
pub use self::core::wynn::{Breakdown, BreakdownKind};
pub use self::errors::{GWRError, GWRResult};
pub use self::inverter::{GWRInverter, InversionOutcome, InversionStatus, gwr};
pub use self::traits::LaplaceTransform;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_laplace::inversion::prelude::*;
//
// to import the main inversion surface in a single line.

pub mod prelude {
    pub use super::core::options::{BreakdownPolicy, GWROptions};
    pub use super::errors::{GWRError, GWRResult};
    pub use super::inverter::{GWRInverter, InversionOutcome, gwr};
    pub use super::traits::LaplaceTransform;
}
