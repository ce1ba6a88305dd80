use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info_span};

use crate::bond::params::BondParameters;
use crate::bond::schedule::{generate_schedule, CashFlowPeriod};
use crate::bond::solver::solve;
use crate::bond::summary::{aggregate, BondSummary};
use crate::config::EngineConfig;
use crate::types::{with_metadata, ComputationOutput};
use crate::BondResult;

/// Full response for one bond: echoed inputs, summary and schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondQuote {
    pub inputs: BondParameters,
    pub summary: BondSummary,
    pub cash_flows: Vec<CashFlowPeriod>,
}

/// Quote a bond, counting payment dates from `params.start_date` or, when
/// absent, from today's UTC date.
pub fn quote_bond(
    params: &BondParameters,
    config: &EngineConfig,
) -> BondResult<ComputationOutput<BondQuote>> {
    quote_bond_as_of(params, Utc::now().date_naive(), config)
}

/// Quote a bond with an explicit fallback start date. Identical inputs give
/// an identical `result`.
pub fn quote_bond_as_of(
    params: &BondParameters,
    as_of: NaiveDate,
    config: &EngineConfig,
) -> BondResult<ComputationOutput<BondQuote>> {
    let start = Instant::now();
    let _span = info_span!(
        "quote_bond",
        face = %params.face_value,
        price = %params.market_price
    )
    .entered();
    let mut warnings: Vec<String> = Vec::new();

    config.validate()?;

    let start_date = params.start_date.unwrap_or(as_of);
    let cash_flows = generate_schedule(params, start_date, config)?;
    let yields = solve(params, &cash_flows, config)?;

    if let Some(e) = &yields.ytm_error {
        warnings.push(format!("Yield to maturity unavailable: {e}"));
    }
    if yields.current_yield.is_none() {
        warnings.push("Market price is zero; current yield undefined".into());
    }

    let summary = aggregate(params, &cash_flows, &yields, config);
    debug!(
        periods = cash_flows.len(),
        ytm = ?summary.yield_to_maturity,
        classification = ?summary.price_relative_to_face,
        "bond quoted"
    );

    let output = BondQuote {
        inputs: params.clone(),
        summary,
        cash_flows,
    };

    let frequency = Decimal::from(params.coupon_frequency.periods_per_year());
    let tolerance = config.tolerance_for(params.face_value)?;
    let assumptions = serde_json::json!({
        "amortization": config.amortization,
        "rounding": format!("round-half-even to {} decimal places", config.decimal_places),
        "convergence_tolerance": tolerance,
        "max_iterations": config.max_iterations,
        "bisection_bracket": [
            config.lower_bound_factor * frequency,
            config.initial_upper_bound,
        ],
        "payment_dates": "start date plus period x 12 / frequency calendar months",
        "start_date": start_date,
    });

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Bond Yield Analysis — amortizing schedule, Newton-Raphson YTM with bisection fallback",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}
