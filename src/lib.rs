//! rust_laplace — numerical Laplace transform inversion at arbitrary precision.
//!
//! Purpose
//! -------
//! Serve as the crate root for the Gaver–Wynn-rho (GWR) inversion engine:
//! given a transform `F(s)` that can be evaluated at arbitrary decimal
//! precision and a time point `t > 0`, approximate the time-domain function
//! `f(t)` without a closed-form inverse.
//!
//! Key behaviors
//! -------------
//! - Re-export the [`inversion`] subtree as the public crate surface:
//!   options, the inverter, error types and the transform trait.
//! - Provide small `f64` ⇄ decimal helpers in [`utils`] used by the `f64`
//!   entry points.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is carried out in `dashu_float::DBig` at a working
//!   precision chosen per call; no global state outlives a call.
//! - Errors are reported as [`inversion::GWRError`] values; the library does
//!   not panic on user-facing invalid input.
//!
//! Conventions
//! -----------
//! - "Precision" always means significant decimal digits.
//! - `M` denotes the number of Gaver terms, `M1 ≤ M` the number that could
//!   actually be evaluated.
//! - Diagnostics are emitted through `tracing` events; the crate never
//!   installs a subscriber.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use dashu_float::DBig;
//! use rust_laplace::inversion::{DEFAULT_ORDER, gwr};
//!
//! // F(s) = 1 / (s + 1)  ⇔  f(t) = e^{-t}
//! let decay = |s: &DBig| -> anyhow::Result<DBig> { Ok(DBig::ONE / (s + DBig::ONE)) };
//! let f1 = gwr(&decay, 1.0, DEFAULT_ORDER, 0).unwrap();
//! assert!((f1.to_f64().value() - (-1.0_f64).exp()).abs() < 1e-12);
//! ```

pub mod inversion;
pub mod utils;
