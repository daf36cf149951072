//! Working precision — derivation, ambient register and scoped restore.
//!
//! Purpose
//! -------
//! Decide how many significant decimal digits one inversion call works at,
//! and expose that choice to user transforms for the duration of the call
//! without leaving any process state mutated afterward.
//!
//! Key behaviors
//! -------------
//! - [`WorkingPrecision::derive`] computes `P = override` when `override > 0`,
//!   else `round(2.1 · M)`, then applies a lower floor (default
//!   [`MACHINE_PRECISION`]).
//! - [`set_precision`] activates a derived precision as the thread's ambient
//!   precision and returns a [`PrecisionGuard`]; dropping the guard restores
//!   the previous value on every exit path, including `?` early returns.
//! - [`ambient_precision`] reads the active value so transforms can build
//!   constants at the precision the inversion is running at.
//!
//! Invariants & assumptions
//! ------------------------
//! - Core arithmetic never consults the ambient register: the generator and
//!   accelerator receive the `WorkingPrecision` explicitly and every
//!   big-float they create carries it in its own context.
//! - The ambient register is thread-local, so concurrent inversions on
//!   different threads never observe each other's precision.
//! - Guards nest: the innermost guard restores the value the enclosing guard
//!   activated.

use std::cell::Cell;
use std::fmt;

use dashu_float::DBig;

/// Lower bound applied to derived precisions unless disabled (≈ f64 digits).
pub const MACHINE_PRECISION: usize = 15;

thread_local! {
    static AMBIENT: Cell<usize> = const { Cell::new(MACHINE_PRECISION) };
}

/// WorkingPrecision — significant decimal digits for one inversion call.
///
/// Invariants
/// ----------
/// - `digits() ≥ 1`; a zero precision would make big-float division panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkingPrecision(usize);

impl WorkingPrecision {
    /// Wrap an explicit digit count, clamping it to at least one digit.
    pub fn new(digits: usize) -> Self {
        WorkingPrecision(digits.max(1))
    }

    /// Derive the working precision for `order` Gaver terms.
    ///
    /// Parameters
    /// ----------
    /// - `order`: `usize`
    ///   Number of Gaver terms `M`.
    /// - `precision_override`: `usize`
    ///   Explicit digit count; `0` selects the automatic rule.
    /// - `floor`: `usize`
    ///   Minimum digit count; `0` disables the floor.
    ///
    /// Returns
    /// -------
    /// `WorkingPrecision`
    ///   `max(override if override > 0 else round(2.1 · M), floor)`, at
    ///   least one digit. `round(2.1 · M)` is evaluated in integers as
    ///   `(21·M + 5) / 10` so `M = 32` gives 67 digits.
    pub fn derive(order: usize, precision_override: usize, floor: usize) -> Self {
        let base = if precision_override > 0 {
            precision_override
        } else {
            (21 * order + 5) / 10
        };
        WorkingPrecision::new(base.max(floor))
    }

    /// Number of significant decimal digits.
    pub fn digits(self) -> usize {
        self.0
    }

    /// Round `value` to this precision.
    pub fn round(self, value: DBig) -> DBig {
        value.with_precision(self.0).value()
    }
}

impl fmt::Display for WorkingPrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} digits", self.0)
    }
}

/// Precision currently active on this thread.
///
/// Outside any inversion this is [`MACHINE_PRECISION`].
pub fn ambient_precision() -> WorkingPrecision {
    WorkingPrecision(AMBIENT.with(Cell::get))
}

/// Activate the precision derived from `(order, precision_override, floor)`.
///
/// Returns
/// -------
/// `PrecisionGuard`
///   Holds the previously active precision; the previous value is restored
///   when the guard is dropped.
///
/// Examples
/// --------
/// ```rust
/// use rust_laplace::inversion::core::precision::{ambient_precision, set_precision};
///
/// let before = ambient_precision();
/// {
///     let guard = set_precision(32, 0, 15);
///     assert_eq!(guard.active().digits(), 67);
///     assert_eq!(ambient_precision().digits(), 67);
/// }
/// assert_eq!(ambient_precision(), before);
/// ```
pub fn set_precision(order: usize, precision_override: usize, floor: usize) -> PrecisionGuard {
    PrecisionGuard::activate(WorkingPrecision::derive(order, precision_override, floor))
}

/// PrecisionGuard — scoped activation of a working precision.
///
/// Dropping the guard writes `previous` back into the ambient register.
#[derive(Debug)]
#[must_use = "the previous precision is restored as soon as the guard is dropped"]
pub struct PrecisionGuard {
    previous: WorkingPrecision,
    active: WorkingPrecision,
}

impl PrecisionGuard {
    /// Make `active` the ambient precision and remember the prior value.
    pub fn activate(active: WorkingPrecision) -> Self {
        let previous = WorkingPrecision(AMBIENT.with(|cell| cell.replace(active.0)));
        tracing::debug!(previous = previous.0, active = active.0, "working precision activated");
        PrecisionGuard { previous, active }
    }

    /// Precision that was active before this guard.
    pub fn previous(&self) -> WorkingPrecision {
        self.previous
    }

    /// Precision activated by this guard.
    pub fn active(&self) -> WorkingPrecision {
        self.active
    }
}

impl Drop for PrecisionGuard {
    fn drop(&mut self) {
        AMBIENT.with(|cell| cell.set(self.previous.0));
        tracing::debug!(restored = self.previous.0, "working precision restored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The automatic `round(2.1 · M)` rule, explicit overrides and the floor.
    // - Activation and restoration of the ambient register, including
    //   nested guards.
    //
    // They intentionally DO NOT cover:
    // - Restoration on error paths of a full inversion; see the inverter
    //   tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the automatic precision rule and the documented default.
    //
    // Given
    // -----
    // - M = 32, M = 16 and M = 40 with no override and the floor disabled.
    //
    // Expect
    // ------
    // - 67, 34 and 84 digits respectively.
    fn derive_auto_rule_rounds_two_point_one_times_order() {
        // Act / Assert
        assert_eq!(WorkingPrecision::derive(32, 0, 0).digits(), 67);
        assert_eq!(WorkingPrecision::derive(16, 0, 0).digits(), 34);
        assert_eq!(WorkingPrecision::derive(40, 0, 0).digits(), 84);
    }

    #[test]
    // Purpose
    // -------
    // Ensure overrides take precedence and the floor only raises precision.
    //
    // Given
    // -----
    // - Override 100 with M = 4; override 0 with M = 2 and floor 15.
    //
    // Expect
    // ------
    // - 100 digits, then 15 digits (round(4.2) = 4 is floored).
    fn derive_override_wins_and_floor_applies() {
        // Act / Assert
        assert_eq!(WorkingPrecision::derive(4, 100, MACHINE_PRECISION).digits(), 100);
        assert_eq!(WorkingPrecision::derive(2, 0, MACHINE_PRECISION).digits(), 15);
        assert_eq!(WorkingPrecision::derive(2, 0, 0).digits(), 4);
    }

    #[test]
    // Purpose
    // -------
    // Verify that guards restore the previous ambient value, innermost first.
    //
    // Given
    // -----
    // - An outer guard at 67 digits and an inner guard at 100 digits.
    //
    // Expect
    // ------
    // - Ambient reads 100 inside, 67 after the inner drop and the original
    //   value after the outer drop.
    fn guards_restore_previous_precision_when_nested() {
        // Arrange
        let original = ambient_precision();

        // Act / Assert
        {
            let outer = set_precision(32, 0, MACHINE_PRECISION);
            assert_eq!(outer.previous(), original);
            {
                let inner = set_precision(32, 100, MACHINE_PRECISION);
                assert_eq!(inner.previous().digits(), 67);
                assert_eq!(ambient_precision().digits(), 100);
            }
            assert_eq!(ambient_precision().digits(), 67);
        }
        assert_eq!(ambient_precision(), original);
    }
}
