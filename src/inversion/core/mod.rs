//! inversion::core — numerical building blocks of the GWR scheme.
//!
//! Purpose
//! -------
//! Hold the pieces a single inversion is assembled from, leaves first:
//! working-precision management, the combinatorial cache, the Gaver
//! functional generator, the Wynn-rho accelerator and the option types that
//! configure them.
//!
//! Key behaviors
//! -------------
//! - [`precision`]: derive `P = round(2.1·M)` (or an override), expose it as
//!   the thread's ambient precision through a restoring guard.
//! - [`combinatorics`]: exact big-integer factorials and binomials, rounded
//!   once to `P` and memoized per `(n, i, P)`.
//! - [`gaver`]: sample `F(i·ln2/t)` and build the order-0 sequence, truncating
//!   on late failures.
//! - [`wynn`]: accelerate the sequence and pick the best estimate, with the
//!   breakdown policy from [`options`].
//!
//! Conventions
//! -----------
//! - Every function here takes its `WorkingPrecision` explicitly; only
//!   user transforms read the ambient value.
//! - All big floats are `dashu_float::DBig` (decimal base), so "digits" in
//!   this crate always means significant decimal digits.

pub mod combinatorics;
pub mod gaver;
pub mod options;
pub mod precision;
pub mod wynn;
