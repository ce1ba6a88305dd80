//! Numeric configuration for the engine.
//!
//! Every constant the schedule generator and yield solver depend on lives
//! here and is passed explicitly, so callers (and tests) can vary tolerances
//! without touching engine code.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::BondAnalyticsError;
use crate::types::Money;
use crate::BondResult;

/// Largest accepted first bisection upper bound. Together with
/// `MAX_BRACKET_EXPANSIONS` this keeps every doubled bound, and the growth
/// factor built from it, well inside `Decimal` range.
const MAX_UPPER_BOUND: Decimal = dec!(1000000);
const MAX_BRACKET_EXPANSIONS: u32 = 64;

/// How principal is returned over the life of the bond.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmortizationPolicy {
    /// A fixed principal installment `face / n` every period.
    #[default]
    LevelPrincipal,
    /// No principal until the final period, which repays the full face.
    Bullet,
}

/// Engine configuration. Missing fields in a config file fall back to the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Decimal places for every monetary value in the schedule.
    pub decimal_places: u32,
    /// Convergence tolerance as a fraction of face value.
    pub tolerance_factor: Decimal,
    /// Newton-Raphson iteration cap.
    pub max_iterations: u32,
    /// Bisection iteration cap, once a bracket is found.
    pub max_bisection_iterations: u32,
    /// Bisection lower bound, as a multiple of the coupon frequency.
    pub lower_bound_factor: Decimal,
    /// First bisection upper bound (annualized yield).
    pub initial_upper_bound: Decimal,
    /// How many times the upper bound may double while searching for a bracket.
    pub max_bracket_expansions: u32,
    pub amortization: AmortizationPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            decimal_places: 2,
            tolerance_factor: dec!(0.000001),
            max_iterations: 100,
            max_bisection_iterations: 200,
            lower_bound_factor: dec!(-0.99),
            initial_upper_bound: dec!(10.0),
            max_bracket_expansions: 20,
            amortization: AmortizationPolicy::LevelPrincipal,
        }
    }
}

impl EngineConfig {
    /// Reject configurations under which the solver cannot terminate sensibly.
    pub fn validate(&self) -> BondResult<()> {
        if self.decimal_places > 10 {
            return Err(BondAnalyticsError::InvalidParameter {
                field: "decimal_places".into(),
                reason: "Rounding precision must be between 0 and 10 decimal places".into(),
            });
        }
        if self.tolerance_factor <= Decimal::ZERO || self.tolerance_factor >= Decimal::ONE {
            return Err(BondAnalyticsError::InvalidParameter {
                field: "tolerance_factor".into(),
                reason: "Convergence tolerance must lie strictly between 0 and 1 of face value"
                    .into(),
            });
        }
        if self.lower_bound_factor <= dec!(-1) || self.lower_bound_factor >= Decimal::ZERO {
            return Err(BondAnalyticsError::InvalidParameter {
                field: "lower_bound_factor".into(),
                reason: "Lower bound factor must lie strictly between -1 and 0".into(),
            });
        }
        if self.initial_upper_bound <= Decimal::ZERO || self.initial_upper_bound > MAX_UPPER_BOUND {
            return Err(BondAnalyticsError::InvalidParameter {
                field: "initial_upper_bound".into(),
                reason: format!("Initial upper bound must lie in (0, {MAX_UPPER_BOUND}]"),
            });
        }
        if self.max_bracket_expansions > MAX_BRACKET_EXPANSIONS {
            return Err(BondAnalyticsError::InvalidParameter {
                field: "max_bracket_expansions".into(),
                reason: format!("At most {MAX_BRACKET_EXPANSIONS} upper-bound doublings are allowed"),
            });
        }
        Ok(())
    }

    /// Absolute convergence tolerance for a bond of the given face value.
    pub fn tolerance_for(&self, face_value: Money) -> BondResult<Decimal> {
        self.tolerance_factor
            .checked_mul(face_value)
            .ok_or_else(|| BondAnalyticsError::overflow("convergence tolerance"))
    }
}
