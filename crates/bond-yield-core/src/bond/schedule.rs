//! Cash-flow schedule generation.
//!
//! Coupons accrue on the outstanding principal of each period. Under level
//! principal amortization a fixed installment `face / n` is repaid every
//! period; under the bullet policy the whole face is repaid at maturity.
//! Every monetary value is rounded exactly once, and the final period absorbs
//! the rounding remainder, so principal sums to the (rounded) face value and
//! the remaining balance ends at exactly zero.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bond::params::{validate_parameters, BondParameters, CouponFrequency};
use crate::config::{AmortizationPolicy, EngineConfig};
use crate::error::BondAnalyticsError;
use crate::time_value::{period_count, round_money};
use crate::types::Money;
use crate::BondResult;

/// One row of the cash-flow schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowPeriod {
    /// 1-based period index
    pub period: u32,
    /// ISO-8601 payment date
    pub payment_date: NaiveDate,
    pub coupon_payment: Money,
    pub principal_payment: Money,
    /// Coupon plus principal
    pub total_cash_flow: Money,
    /// Running sum of coupon payments up to and including this period
    pub cumulative_interest: Money,
    /// Principal outstanding after this period's payment
    pub remaining_principal: Money,
}

/// Build the period-by-period schedule for `params`, counting payment dates
/// from `start_date`.
pub fn generate_schedule(
    params: &BondParameters,
    start_date: NaiveDate,
    config: &EngineConfig,
) -> BondResult<Vec<CashFlowPeriod>> {
    validate_parameters(params)?;

    let frequency = params.coupon_frequency;
    let periods_per_year = frequency.periods_per_year();
    let raw_periods = period_count(params.years_to_maturity, periods_per_year)?;
    if raw_periods < 1 {
        return Err(BondAnalyticsError::InvalidSchedule {
            periods: raw_periods,
            reason: format!(
                "{} years is shorter than one {} coupon period",
                params.years_to_maturity, frequency
            ),
        });
    }
    let periods =
        u32::try_from(raw_periods).map_err(|_| BondAnalyticsError::overflow("period count"))?;

    // Reject schedules whose maturity falls outside the calendar before
    // allocating anything.
    payment_date(start_date, periods, frequency)?;

    let dp = config.decimal_places;
    let periodic_rate = params.annual_coupon_rate / Decimal::from(periods_per_year);
    let face = round_money(params.face_value, dp);
    let installment = match config.amortization {
        AmortizationPolicy::LevelPrincipal => round_money(face / Decimal::from(periods), dp),
        AmortizationPolicy::Bullet => Decimal::ZERO,
    };

    let mut schedule = Vec::with_capacity(periods as usize);
    let mut outstanding = face;
    let mut cumulative_interest = Decimal::ZERO;

    for period in 1..=periods {
        let coupon_payment = outstanding
            .checked_mul(periodic_rate)
            .map(|c| round_money(c, dp))
            .ok_or_else(|| BondAnalyticsError::overflow(format!("coupon at period {period}")))?;

        let principal_payment = if period == periods {
            outstanding
        } else {
            installment.min(outstanding)
        };

        outstanding -= principal_payment;
        cumulative_interest = cumulative_interest
            .checked_add(coupon_payment)
            .ok_or_else(|| BondAnalyticsError::overflow("cumulative interest"))?;

        let total_cash_flow = coupon_payment
            .checked_add(principal_payment)
            .ok_or_else(|| BondAnalyticsError::overflow(format!("total cash flow at period {period}")))?;

        schedule.push(CashFlowPeriod {
            period,
            payment_date: payment_date(start_date, period, frequency)?,
            coupon_payment,
            principal_payment,
            total_cash_flow,
            cumulative_interest,
            remaining_principal: outstanding,
        });
    }

    debug!(
        periods,
        policy = ?config.amortization,
        total_interest = %cumulative_interest,
        "generated cash-flow schedule"
    );

    Ok(schedule)
}

/// `start + period / frequency` years, stepping in whole calendar months.
/// Days past the end of the target month clamp to its last day.
fn payment_date(start: NaiveDate, period: u32, frequency: CouponFrequency) -> BondResult<NaiveDate> {
    frequency
        .months_per_period()
        .checked_mul(period)
        .and_then(|months| start.checked_add_months(Months::new(months)))
        .ok_or_else(|| BondAnalyticsError::overflow(format!("payment date at period {period}")))
}
