//! Single-bond analytics: cash-flow schedule, yields, and summary.
//!
//! The pipeline is strictly sequential and stateless:
//! parameters -> [`schedule::generate_schedule`] -> [`solver::solve`] ->
//! [`summary::aggregate`], wrapped by [`quote::quote_bond`].

pub mod params;
pub mod quote;
pub mod schedule;
pub mod solver;
pub mod summary;

pub use params::{validate_parameters, BondParameters, CouponFrequency};
pub use quote::{quote_bond, quote_bond_as_of, BondQuote};
pub use schedule::{generate_schedule, CashFlowPeriod};
pub use solver::{current_yield, solve, solve_ytm, SolverMethod, YieldResult, YieldStatus, YtmSolution};
pub use summary::{aggregate, classify_price, BondSummary, PriceRelativeToFace};
