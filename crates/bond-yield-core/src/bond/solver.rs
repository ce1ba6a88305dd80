//! Current yield and yield to maturity.
//!
//! Yield to maturity is the annualized nominal rate `y` solving
//!   market_price = sum_{i=1}^{n} CF_i / (1 + y/f)^i
//! over the schedule's total cash flows. Newton-Raphson runs first, seeded at
//! the current yield; if it diverges the solver falls back to bisection on
//! `[lower_bound_factor * f, initial_upper_bound]`, doubling the upper bound
//! until the market price is bracketed. Price is strictly decreasing in `y`
//! for non-negative cash flows, so there is at most one root.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::bond::params::BondParameters;
use crate::bond::schedule::CashFlowPeriod;
use crate::config::EngineConfig;
use crate::error::BondAnalyticsError;
use crate::time_value::{price_and_derivative, price_at_yield};
use crate::types::{Money, Rate};
use crate::BondResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Root-finding method that produced a yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolverMethod {
    NewtonRaphson,
    Bisection,
}

/// How the yield-to-maturity field was obtained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum YieldStatus {
    Converged { method: SolverMethod, iterations: u32 },
    NotFound { reason: String },
}

/// A converged yield-to-maturity solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YtmSolution {
    pub yield_to_maturity: Rate,
    pub method: SolverMethod,
    pub iterations: u32,
}

/// Yield metrics for one bond. `None` marks an undefined (non-finite) yield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldResult {
    pub current_yield: Option<Rate>,
    pub yield_to_maturity: Option<Rate>,
    pub ytm_status: YieldStatus,
    /// The recoverable error behind an undefined yield to maturity.
    #[serde(skip)]
    pub ytm_error: Option<BondAnalyticsError>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Annual coupon income over market price. Undefined for a zero price.
pub fn current_yield(params: &BondParameters) -> BondResult<Option<Rate>> {
    if params.market_price.is_zero() {
        return Ok(None);
    }
    params
        .annual_coupon_rate
        .checked_mul(params.face_value)
        .and_then(|coupon| coupon.checked_div(params.market_price))
        .map(Some)
        .ok_or_else(|| BondAnalyticsError::overflow("current yield"))
}

/// Compute current yield and yield to maturity. A yield to maturity that
/// cannot be bracketed degrades to `None` with the error recorded; every
/// other failure aborts.
pub fn solve(
    params: &BondParameters,
    schedule: &[CashFlowPeriod],
    config: &EngineConfig,
) -> BondResult<YieldResult> {
    let current_yield = current_yield(params)?;

    match solve_ytm(params, schedule, config) {
        Ok(solution) => Ok(YieldResult {
            current_yield,
            yield_to_maturity: Some(solution.yield_to_maturity),
            ytm_status: YieldStatus::Converged {
                method: solution.method,
                iterations: solution.iterations,
            },
            ytm_error: None,
        }),
        Err(e) if e.is_recoverable() => {
            warn!(error = %e, "yield to maturity unavailable");
            Ok(YieldResult {
                current_yield,
                yield_to_maturity: None,
                ytm_status: YieldStatus::NotFound {
                    reason: e.to_string(),
                },
                ytm_error: Some(e),
            })
        }
        Err(e) => Err(e),
    }
}

/// Solve for the annualized yield to maturity of `schedule` at the bond's
/// market price.
pub fn solve_ytm(
    params: &BondParameters,
    schedule: &[CashFlowPeriod],
    config: &EngineConfig,
) -> BondResult<YtmSolution> {
    if schedule.is_empty() {
        return Err(BondAnalyticsError::InvalidSchedule {
            periods: 0,
            reason: "no cash flows to discount".into(),
        });
    }

    let cash_flows: Vec<Money> = schedule.iter().map(|p| p.total_cash_flow).collect();
    let problem = PricingProblem {
        cash_flows: &cash_flows,
        periods_per_year: params.coupon_frequency.periods_per_year(),
        market_price: params.market_price,
        tolerance: config.tolerance_for(params.face_value)?,
    };

    let seed = current_yield(params)?.unwrap_or(params.annual_coupon_rate);
    if let Some(solution) = newton_raphson(&problem, seed, config.max_iterations) {
        return Ok(solution);
    }

    warn!(seed = %seed, "Newton-Raphson diverged; falling back to bisection");
    bisection(&problem, config)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

struct PricingProblem<'a> {
    cash_flows: &'a [Money],
    periods_per_year: u32,
    market_price: Money,
    tolerance: Decimal,
}

/// Sign information for `price(y) - market_price`.
enum Residual {
    Value(Decimal),
    /// The price exceeds Decimal's range, so it is certainly above market.
    AboveRange,
}

impl PricingProblem<'_> {
    fn residual(&self, annual_yield: Rate) -> BondResult<Residual> {
        match price_at_yield(self.cash_flows, self.periods_per_year, annual_yield) {
            Ok(price) => price
                .checked_sub(self.market_price)
                .map(Residual::Value)
                .ok_or_else(|| BondAnalyticsError::overflow("price residual")),
            Err(BondAnalyticsError::NumericOverflow { .. }) => Ok(Residual::AboveRange),
            Err(e) => Err(e),
        }
    }
}

/// Newton-Raphson from `seed`. Returns `None` on divergence: a step at or
/// below -100% per period, an unrepresentable price, a flat derivative, or
/// no convergence within `max_iterations`.
fn newton_raphson(problem: &PricingProblem<'_>, seed: Rate, max_iterations: u32) -> Option<YtmSolution> {
    let floor = -Decimal::from(problem.periods_per_year);
    let mut y = seed;

    for iteration in 0..max_iterations {
        if y <= floor {
            debug!(iteration, yield_guess = %y, "Newton step left the admissible domain");
            return None;
        }

        let (price, slope) =
            match price_and_derivative(problem.cash_flows, problem.periods_per_year, y) {
                Ok(v) => v,
                Err(e) => {
                    debug!(iteration, error = %e, "Newton price evaluation failed");
                    return None;
                }
            };

        let residual = price.checked_sub(problem.market_price)?;
        if residual.abs() < problem.tolerance {
            debug!(iteration, ytm = %y, "Newton-Raphson converged");
            return Some(YtmSolution {
                yield_to_maturity: y,
                method: SolverMethod::NewtonRaphson,
                iterations: iteration,
            });
        }

        if slope.is_zero() {
            return None;
        }

        y = y.checked_sub(residual.checked_div(slope)?)?;
    }

    debug!(max_iterations, "Newton-Raphson hit its iteration cap");
    None
}

/// Bisection over a bracket whose upper bound doubles until the price at it
/// falls below the market price.
fn bisection(problem: &PricingProblem<'_>, config: &EngineConfig) -> BondResult<YtmSolution> {
    let lower = config.lower_bound_factor * Decimal::from(problem.periods_per_year);
    let mut upper = config.initial_upper_bound;

    let converged = |y: Rate, iterations: u32| -> BondResult<YtmSolution> {
        debug!(iterations, ytm = %y, "bisection converged");
        Ok(YtmSolution {
            yield_to_maturity: y,
            method: SolverMethod::Bisection,
            iterations,
        })
    };

    if let Residual::Value(r) = problem.residual(lower)? {
        if r.abs() < problem.tolerance {
            return converged(lower, 0);
        }
        if r < Decimal::ZERO {
            return Err(BondAnalyticsError::YieldNotFound {
                reason: "market price is above the bond's price at the lowest admissible yield"
                    .into(),
                lower,
                upper,
            });
        }
    }

    let mut expansions = 0;
    loop {
        if let Residual::Value(r) = problem.residual(upper)? {
            if r.abs() < problem.tolerance {
                return converged(upper, 0);
            }
            if r < Decimal::ZERO {
                break;
            }
        }
        if expansions == config.max_bracket_expansions {
            return Err(BondAnalyticsError::YieldNotFound {
                reason: format!(
                    "market price is below the bond's price at every yield tried \
                     ({expansions} upper-bound expansions)"
                ),
                lower,
                upper,
            });
        }
        upper = upper
            .checked_mul(dec!(2))
            .ok_or_else(|| BondAnalyticsError::overflow("bisection upper bound"))?;
        expansions += 1;
    }
    debug!(%lower, %upper, expansions, "bracketed market price");

    let (mut lo, mut hi) = (lower, upper);
    for iteration in 1..=config.max_bisection_iterations {
        let mid = lo / dec!(2) + hi / dec!(2);
        match problem.residual(mid)? {
            Residual::Value(r) if r.abs() < problem.tolerance => return converged(mid, iteration),
            Residual::Value(r) if r < Decimal::ZERO => hi = mid,
            _ => lo = mid,
        }
    }

    Err(BondAnalyticsError::YieldNotFound {
        reason: format!(
            "bisection did not converge within {} iterations",
            config.max_bisection_iterations
        ),
        lower: lo,
        upper: hi,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
