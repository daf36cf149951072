//! GWR options — configuration for one inverter.
//!
//! Purpose
//! -------
//! Collect the knobs of a Gaver–Wynn-rho inversion (number of Gaver terms,
//! precision override and floor, breakdown policy) in one validated value so
//! call sites pass explicit options instead of ad-hoc arguments.
//!
//! Key behaviors
//! -------------
//! - [`GWROptions::new`] validates `order ≥ 1`.
//! - [`GWROptions::default`] reproduces the reference defaults: `M = 32`,
//!   automatic precision (67 digits), floor [`MACHINE_PRECISION`], and
//!   [`BreakdownPolicy::HaltAll`].
//! - [`BreakdownPolicy`] parses case-insensitively from strings.
//!
//! Conventions
//! -----------
//! - `precision_override = 0` means "derive `round(2.1 · M)`"; `floor = 0`
//!   disables the precision floor.

use std::str::FromStr;

use crate::inversion::{
    core::precision::{MACHINE_PRECISION, WorkingPrecision},
    errors::{GWRError, GWRResult},
};

/// Default number of Gaver terms.
pub const DEFAULT_ORDER: usize = 32;

/// What the Wynn-rho accelerator does on a breakdown.
///
/// Variants:
/// - `HaltAll`: any breakdown (exact-zero difference or non-finite operand)
///   stops the current order and every later order; the last candidate is
///   returned.
/// - `HaltOrder`: an exact-zero difference only abandons the remaining
///   indices of the current order; the table is still rotated and later
///   orders run. A non-finite operand still halts everything.
///
/// Parsing:
/// Accepts `"HaltAll"` / `"HaltOrder"` in any case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BreakdownPolicy {
    #[default]
    HaltAll,
    HaltOrder,
}

impl FromStr for BreakdownPolicy {
    type Err = GWRError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "haltall" => Ok(BreakdownPolicy::HaltAll),
            "haltorder" => Ok(BreakdownPolicy::HaltOrder),
            _ => Err(GWRError::InvalidBreakdownPolicy { name: s.to_string() }),
        }
    }
}

/// GWROptions — inversion configuration.
///
/// Fields
/// ------
/// - `order`: `usize`
///   Number of Gaver terms `M ≥ 1`.
/// - `precision_override`: `usize`
///   Explicit working precision in decimal digits; `0` derives
///   `round(2.1 · M)`.
/// - `precision_floor`: `usize`
///   Minimum working precision; `0` disables it.
/// - `breakdown`: [`BreakdownPolicy`]
///   Behavior of the accelerator on a vanishing difference.
///
/// Default:
/// - `order = 32`, `precision_override = 0`, `precision_floor = 15`,
///   `breakdown = HaltAll`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GWROptions {
    pub order: usize,
    pub precision_override: usize,
    pub precision_floor: usize,
    pub breakdown: BreakdownPolicy,
}

impl GWROptions {
    /// Build validated options.
    ///
    /// Errors
    /// ------
    /// - `GWRError::InvalidOrder` when `order == 0`.
    pub fn new(
        order: usize, precision_override: usize, precision_floor: usize, breakdown: BreakdownPolicy,
    ) -> GWRResult<Self> {
        if order == 0 {
            return Err(GWRError::InvalidOrder { order });
        }
        Ok(GWROptions { order, precision_override, precision_floor, breakdown })
    }

    /// Default options with `order` Gaver terms.
    pub fn with_order(order: usize) -> GWRResult<Self> {
        Self::new(order, 0, MACHINE_PRECISION, BreakdownPolicy::default())
    }

    /// Working precision these options imply.
    pub fn precision(&self) -> WorkingPrecision {
        WorkingPrecision::derive(self.order, self.precision_override, self.precision_floor)
    }
}

impl Default for GWROptions {
    fn default() -> Self {
        GWROptions {
            order: DEFAULT_ORDER,
            precision_override: 0,
            precision_floor: MACHINE_PRECISION,
            breakdown: BreakdownPolicy::HaltAll,
        }
    }
}
