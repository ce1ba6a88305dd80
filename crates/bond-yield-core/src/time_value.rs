use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::BondAnalyticsError;
use crate::types::{Money, Rate, Years};
use crate::BondResult;

/// Round a monetary value to `decimal_places` using banker's rounding
/// (round half to even).
pub fn round_money(value: Money, decimal_places: u32) -> Money {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}

/// Number of whole coupon periods in `years`, rounded half to even.
pub fn period_count(years: Years, periods_per_year: u32) -> BondResult<i64> {
    let exact = years
        .checked_mul(Decimal::from(periods_per_year))
        .ok_or_else(|| BondAnalyticsError::overflow("period count"))?;
    exact
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .to_i64()
        .ok_or_else(|| BondAnalyticsError::overflow("period count"))
}

/// One plus the periodic yield, rejecting rates at or below -100% per period.
fn periodic_growth(annual_yield: Rate, periods_per_year: u32) -> BondResult<Decimal> {
    let one_plus = Decimal::ONE
        .checked_add(annual_yield / Decimal::from(periods_per_year))
        .ok_or_else(|| BondAnalyticsError::overflow("periodic growth factor"))?;
    if one_plus <= Decimal::ZERO {
        return Err(BondAnalyticsError::InvalidParameter {
            field: "yield".into(),
            reason: "Periodic discount rate must be greater than -100%".into(),
        });
    }
    Ok(one_plus)
}

/// Present value of end-of-period cash flows at an annualized nominal yield:
///   PV = sum_{i=1}^{n} CF_i / (1 + y/f)^i
///
/// Discount factors are built by iterative division, and every step is
/// checked so an out-of-range intermediate surfaces as `NumericOverflow`.
pub fn price_at_yield(
    cash_flows: &[Money],
    periods_per_year: u32,
    annual_yield: Rate,
) -> BondResult<Money> {
    let one_plus = periodic_growth(annual_yield, periods_per_year)?;

    let mut price = Decimal::ZERO;
    let mut discount = Decimal::ONE;
    for (i, cf) in cash_flows.iter().enumerate() {
        discount = discount
            .checked_div(one_plus)
            .ok_or_else(|| BondAnalyticsError::overflow(format!("discount factor at period {}", i + 1)))?;
        price = cf
            .checked_mul(discount)
            .and_then(|pv| price.checked_add(pv))
            .ok_or_else(|| BondAnalyticsError::overflow(format!("present value at period {}", i + 1)))?;
    }

    Ok(price)
}

/// Present value and its analytic derivative with respect to the annualized
/// yield:
///   dPV/dy = -sum_{i=1}^{n} (i/f) * CF_i / (1 + y/f)^{i+1}
pub fn price_and_derivative(
    cash_flows: &[Money],
    periods_per_year: u32,
    annual_yield: Rate,
) -> BondResult<(Money, Decimal)> {
    let one_plus = periodic_growth(annual_yield, periods_per_year)?;
    let freq = Decimal::from(periods_per_year);

    let mut price = Decimal::ZERO;
    let mut slope = Decimal::ZERO;
    let mut discount = Decimal::ONE;
    for (i, cf) in cash_flows.iter().enumerate() {
        let overflow = || BondAnalyticsError::overflow(format!("price derivative at period {}", i + 1));
        discount = discount.checked_div(one_plus).ok_or_else(overflow)?;
        let pv = cf.checked_mul(discount).ok_or_else(overflow)?;
        price = price.checked_add(pv).ok_or_else(overflow)?;

        let t = Decimal::from(i as u64 + 1) / freq;
        let dpv = t
            .checked_mul(pv)
            .and_then(|v| v.checked_div(one_plus))
            .ok_or_else(overflow)?;
        slope = slope.checked_sub(dpv).ok_or_else(overflow)?;
    }

    Ok((price, slope))
}
