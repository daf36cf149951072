//! Wynn-rho acceleration of the Gaver sequence.
//!
//! Purpose
//! -------
//! Extrapolate the slowly converging Gaver functionals `G₀[0..M1)` with the
//! Wynn-rho recurrence
//!
//! ```text
//! ρ_{k+1}[n] = ρ_{k−1}[n+1] + (k + 1) / (ρ_k[n+1] − ρ_k[n]),   ρ_{−1} ≡ 0, ρ_0 = G₀
//! ```
//!
//! and return the most accurate table entry.
//!
//! Key behaviors
//! -------------
//! - Keep three rows of the table (`g0` = ρ_k, `gm` = ρ_{k−1}, `gp` = ρ_{k+1})
//!   and rotate them after every completed order.
//! - Within an order, walk the index *downward* from `M1 − 2 − k` to `0`.
//! - After odd `k` (even table columns), take the top entry
//!   `ρ_{k+1}[M1 − 2 − k]` as the new best estimate.
//! - On an exact-zero difference, stop according to the [`BreakdownPolicy`]
//!   and keep the last best estimate. A non-finite operand, or an entry the
//!   previous order never wrote, halts acceleration under every policy.
//!
//! Invariants & assumptions
//! ------------------------
//! - The input is a [`GaverSequence`], which is never empty; the initial
//!   best estimate is its last element, so acceleration never fails.
//! - `gp` is rebuilt as unset for every order. Under
//!   [`BreakdownPolicy::HaltOrder`] an order cut short leaves the entries
//!   below the break unset, and they are rotated into `g0` as such.

use dashu_float::DBig;
use dashu_int::UBig;

use crate::inversion::core::{
    gaver::GaverSequence, options::BreakdownPolicy, precision::WorkingPrecision,
};

/// Why acceleration stopped before completing every order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakdownKind {
    /// `ρ_k[n+1] − ρ_k[n]` was exactly zero.
    ZeroDifference,
    /// One of the operands was not finite.
    NonFinite,
    /// An operand was left unwritten by an order cut short earlier.
    Unset,
}

impl BreakdownKind {
    /// Whether this breakdown stops every remaining order under `policy`.
    fn halts_all(self, policy: BreakdownPolicy) -> bool {
        self != BreakdownKind::ZeroDifference || policy == BreakdownPolicy::HaltAll
    }
}

/// Location of a breakdown in the extrapolation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakdown {
    pub order: usize,
    pub index: usize,
    pub kind: BreakdownKind,
}

/// Acceleration — result of running Wynn-rho on a Gaver sequence.
///
/// Fields
/// ------
/// - `value`: best estimate of `f(t)`.
/// - `orders_completed`: number of table orders computed and rotated.
/// - `breakdown`: first breakdown met, if any. Under
///   [`BreakdownPolicy::HaltOrder`] several breakdowns may occur; only the
///   first is recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Acceleration {
    pub value: DBig,
    pub orders_completed: usize,
    pub breakdown: Option<Breakdown>,
}

/// Run the Wynn-rho accelerator over `sequence`.
///
/// Parameters
/// ----------
/// - `sequence`: [`GaverSequence`]
///   Order-0 Gaver values `G₀[0..M1)`, `M1 ≥ 1`. Consumed as the working
///   row ρ_0.
/// - `policy`: [`BreakdownPolicy`]
/// - `precision`: [`WorkingPrecision`]
///   Digits for every division and addition.
///
/// Returns
/// -------
/// [`Acceleration`] with the best estimate. With `M1 = 1` no table entries
/// exist and the value is `G₀[0]` unchanged.
pub fn wynn_rho(
    sequence: GaverSequence, policy: BreakdownPolicy, precision: WorkingPrecision,
) -> Acceleration {
    let values = sequence.into_values();
    let m1 = values.len();
    let mut best = values[m1 - 1].clone();
    let mut g0: Vec<Option<DBig>> = values.into_iter().map(Some).collect();
    let mut gm: Vec<Option<DBig>> = vec![Some(DBig::ZERO); m1];
    let mut breakdown = None;
    let mut orders_completed = 0;

    for k in 0..m1 - 1 {
        let top = m1 - 2 - k;
        let numerator = precision.round(DBig::from(UBig::from(k + 1)));
        let mut gp: Vec<Option<DBig>> = vec![None; m1 - k];
        let mut halted = false;

        for n in (0..=top).rev() {
            let step = difference(g0[n + 1].as_ref(), g0[n].as_ref(), precision).and_then(|diff| {
                let lower = gm[n + 1].as_ref().ok_or(BreakdownKind::Unset)?;
                Ok(precision.round(lower + precision.round(&numerator / &diff)))
            });
            let kind = match step {
                Ok(rho) => {
                    if k % 2 == 1 && n == top {
                        best = rho.clone();
                    }
                    gp[n] = Some(rho);
                    continue;
                }
                Err(kind) => kind,
            };

            tracing::debug!(order = k, index = n, ?kind, "Wynn-rho breakdown");
            breakdown.get_or_insert(Breakdown { order: k, index: n, kind });
            halted = kind.halts_all(policy);
            break;
        }

        if halted {
            break;
        }

        for (n, next) in gp.into_iter().enumerate() {
            gm[n] = std::mem::replace(&mut g0[n], next);
        }
        orders_completed += 1;
    }

    Acceleration { value: best, orders_completed, breakdown }
}

// ---- Helper Methods ----

fn difference(
    upper: Option<&DBig>, lower: Option<&DBig>, precision: WorkingPrecision,
) -> Result<DBig, BreakdownKind> {
    let (Some(upper), Some(lower)) = (upper, lower) else {
        return Err(BreakdownKind::Unset);
    };
    if upper.repr().is_infinite() || lower.repr().is_infinite() {
        return Err(BreakdownKind::NonFinite);
    }
    let diff = precision.round(upper - lower);
    if diff.repr().is_zero() {
        return Err(BreakdownKind::ZeroDifference);
    }
    Ok(diff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::str::FromStr;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The degenerate single-term case.
    // - Acceleration of an algebraically converging sequence to its limit.
    // - Immediate breakdown on a constant sequence.
    // - `HaltAll` vs `HaltOrder`, including the halt on entries an earlier
    //   order left unwritten.
    // - Non-finite operands.
    //
    // They intentionally DO NOT cover:
    // - Gaver-specific accuracy; see the inverter and integration tests.
    // -------------------------------------------------------------------------

    fn dbig(text: &str) -> DBig {
        DBig::from_str(text).expect("literal should parse")
    }

    fn seq(values: Vec<DBig>) -> GaverSequence {
        GaverSequence::new(values).expect("non-empty sequence")
    }

    fn terms(values: &[&str]) -> GaverSequence {
        seq(values.iter().map(|v| dbig(v)).collect())
    }

    fn p() -> WorkingPrecision {
        WorkingPrecision::new(40)
    }

    #[test]
    // Purpose
    // -------
    // A single term has no table entries and is returned unchanged.
    //
    // Given
    // -----
    // - Sequence [0.25].
    //
    // Expect
    // ------
    // - value = 0.25, no completed orders, no breakdown.
    fn single_term_is_returned_unchanged() {
        // Act
        let out = wynn_rho(terms(&["0.25"]), BreakdownPolicy::HaltAll, p());

        // Assert
        assert_eq!(out.value, dbig("0.25"));
        assert_eq!(out.orders_completed, 0);
        assert!(out.breakdown.is_none());
    }

    #[test]
    // Purpose
    // -------
    // Verify that ρ accelerates a sequence with algebraic convergence,
    // the regime Gaver functionals live in.
    //
    // Given
    // -----
    // - x_n = 1 + 1/n for n = 1..=12 (limit 1, error O(1/n)).
    //
    // Expect
    // ------
    // - The accelerated value is within 1e-8 of 1, far better than x_12.
    fn accelerates_algebraic_sequence_to_its_limit() {
        // Arrange
        let values: Vec<DBig> = (1..=12usize)
            .map(|n| {
                let n = p().round(DBig::from(UBig::from(n)));
                p().round(DBig::ONE + p().round(DBig::ONE / n))
            })
            .collect();

        // Act
        let out = wynn_rho(seq(values), BreakdownPolicy::HaltAll, p());

        // Assert
        assert_relative_eq!(out.value.to_f64().value(), 1.0, epsilon = 1e-8);
        assert!(out.orders_completed > 0);
    }

    #[test]
    // Purpose
    // -------
    // A constant sequence breaks down at the very first difference.
    //
    // Given
    // -----
    // - [2, 2, 2, 2].
    //
    // Expect
    // ------
    // - value = 2 (last term), breakdown at order 0, index 2, zero difference.
    fn constant_sequence_breaks_down_immediately() {
        // Act
        let out = wynn_rho(terms(&["2", "2", "2", "2"]), BreakdownPolicy::HaltAll, p());

        // Assert
        assert_eq!(out.value, dbig("2"));
        assert_eq!(out.orders_completed, 0);
        assert_eq!(
            out.breakdown,
            Some(Breakdown { order: 0, index: 2, kind: BreakdownKind::ZeroDifference })
        );
    }

    #[test]
    // Purpose
    // -------
    // Under `HaltOrder`, entries below a zero difference stay unwritten and
    // the next order halts as soon as it would read one of them, so no
    // estimate is built from placeholder values.
    //
    // Given
    // -----
    // - [1, 3, 3, 5]: order 0 writes only ρ_1[2] before the zero at index 1.
    //
    // Expect
    // ------
    // - Both policies return the last term, 5.
    // - HaltAll completes no orders; HaltOrder completes order 0 and then
    //   stops on the unset ρ_1[1].
    // - Both record the first breakdown at order 0, index 1.
    fn halt_order_stops_on_unwritten_entries() {
        // Act
        let all = wynn_rho(terms(&["1", "3", "3", "5"]), BreakdownPolicy::HaltAll, p());
        let per_order = wynn_rho(terms(&["1", "3", "3", "5"]), BreakdownPolicy::HaltOrder, p());

        // Assert
        let expected = Some(Breakdown { order: 0, index: 1, kind: BreakdownKind::ZeroDifference });
        assert_eq!(all.breakdown, expected);
        assert_eq!(per_order.breakdown, expected);
        assert_eq!(all.value, dbig("5"));
        assert_eq!(per_order.value, dbig("5"));
        assert_eq!(all.orders_completed, 0);
        assert_eq!(per_order.orders_completed, 1);
    }

    #[test]
    // Purpose
    // -------
    // `HaltOrder` still uses every entry that was genuinely computed.
    //
    // Given
    // -----
    // - [1, 1, 2, 4]: order 0 writes ρ_1[2] = 1/2 and ρ_1[1] = 1, then meets a
    //   zero difference at index 0.
    //
    // Expect
    // ------
    // - HaltAll returns 4 with no completed orders.
    // - HaltOrder reaches ρ_2[1] = 2 + 2 / (1/2 − 1) = −2, takes it as best
    //   and halts at index 0, which order 0 never wrote.
    fn halt_order_accelerates_from_written_entries_only() {
        // Act
        let all = wynn_rho(terms(&["1", "1", "2", "4"]), BreakdownPolicy::HaltAll, p());
        let per_order = wynn_rho(terms(&["1", "1", "2", "4"]), BreakdownPolicy::HaltOrder, p());

        // Assert
        assert_eq!(all.value, dbig("4"));
        assert_eq!(all.orders_completed, 0);
        assert_eq!(per_order.value, dbig("-2"));
        assert_eq!(per_order.orders_completed, 1);
        assert_eq!(
            per_order.breakdown,
            Some(Breakdown { order: 0, index: 0, kind: BreakdownKind::ZeroDifference })
        );
    }

    #[test]
    // Purpose
    // -------
    // A non-finite entry halts acceleration even under `HaltOrder`.
    //
    // Given
    // -----
    // - [1, +∞, 3] with `HaltOrder`.
    //
    // Expect
    // ------
    // - Breakdown at order 0, index 1, `NonFinite`; the last term is kept.
    fn non_finite_entry_halts_every_policy() {
        // Arrange
        let values = vec![dbig("1"), DBig::INFINITY, dbig("3")];

        // Act
        let out = wynn_rho(seq(values), BreakdownPolicy::HaltOrder, p());

        // Assert
        assert_eq!(out.value, dbig("3"));
        assert_eq!(out.orders_completed, 0);
        assert_eq!(
            out.breakdown,
            Some(Breakdown { order: 0, index: 1, kind: BreakdownKind::NonFinite })
        );
    }
}
