//! Conversion helpers between `f64` inputs and decimal big floats.
//!
//! `f64` time points enter the library through [`decimal_from_f64`], which
//! parses the shortest round-trip decimal rendering of the value. The
//! resulting `DBig` is exact for that rendering, so `0.1_f64` becomes the
//! decimal `0.1` rather than the binary expansion of the nearest double.

use std::str::FromStr;

use dashu_float::DBig;

use crate::inversion::errors::{GWRError, GWRResult};

/// Convert a finite `f64` into a decimal big float.
///
/// # Errors
/// - `GWRError::TimeConversion` if `value` is not finite or its decimal
///   rendering fails to parse.
pub fn decimal_from_f64(value: f64) -> GWRResult<DBig> {
    if !value.is_finite() {
        return Err(GWRError::TimeConversion {
            value,
            reason: "value is not finite".to_string(),
        });
    }
    DBig::from_str(&value.to_string())
        .map_err(|err| GWRError::TimeConversion { value, reason: err.to_string() })
}

/// Lossy conversion of a decimal big float to the nearest `f64`.
pub fn decimal_to_f64(value: &DBig) -> f64 {
    value.to_f64().value()
}
