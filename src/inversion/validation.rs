//! inversion::validation — input guards for the inversion entry points.
//!
//! Purpose
//! -------
//! Centralize the checks every inversion call performs before any sampling
//! or big-float arithmetic: time points must be finite and strictly
//! positive, the number of Gaver terms must be at least one, and batched
//! time arrays must be (after dropping unit axes) at most one-dimensional.
//!
//! Key behaviors
//! -------------
//! - Map invalid inputs into structured [`GWRError`] values.
//! - Never panic and never allocate beyond error construction and the
//!   squeezed shape vector.
//!
//! Downstream usage
//! ----------------
//! - `GWRInverter::invert` calls [`validate_order`] and [`validate_time`].
//! - `GWRInverter::invert_batch` calls [`squeeze_time_shape`] and
//!   [`validate_time_f64`] on every element before inverting any of them.

use dashu_float::DBig;

use crate::inversion::errors::{GWRError, GWRResult};

/// Reject `M = 0`.
pub fn validate_order(order: usize) -> GWRResult<()> {
    if order == 0 {
        return Err(GWRError::InvalidOrder { order });
    }
    Ok(())
}

/// Reject non-finite or non-positive big-float time points.
pub fn validate_time(time: &DBig) -> GWRResult<()> {
    if time.repr().is_infinite() || *time <= DBig::ZERO {
        return Err(GWRError::InvalidTime { value: time.to_string() });
    }
    Ok(())
}

/// Reject non-finite or non-positive `f64` time points.
pub fn validate_time_f64(time: f64) -> GWRResult<()> {
    if !time.is_finite() || time <= 0.0 {
        return Err(GWRError::InvalidTime { value: time.to_string() });
    }
    Ok(())
}

/// Drop unit-length axes from `shape` and require rank ≤ 1.
///
/// Returns
/// -------
/// `GWRResult<Vec<usize>>`
///   - `Ok(vec![])` for a scalar (every axis has length 1, or rank 0).
///   - `Ok(vec![n])` for a vector of `n` time points.
///   - `Err(GWRError::InvalidTimeShape)` when two or more axes have length
///     other than 1.
///
/// Examples
/// --------
/// ```rust
/// # use rust_laplace::inversion::validation::squeeze_time_shape;
/// assert_eq!(squeeze_time_shape(&[1, 3, 1]).unwrap(), vec![3]);
/// assert_eq!(squeeze_time_shape(&[1, 1]).unwrap(), Vec::<usize>::new());
/// assert!(squeeze_time_shape(&[2, 3]).is_err());
/// ```
pub fn squeeze_time_shape(shape: &[usize]) -> GWRResult<Vec<usize>> {
    let squeezed: Vec<usize> = shape.iter().copied().filter(|&len| len != 1).collect();
    if squeezed.len() > 1 {
        return Err(GWRError::InvalidTimeShape { shape: shape.to_vec() });
    }
    Ok(squeezed)
}
