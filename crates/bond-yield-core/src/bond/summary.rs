use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::bond::params::BondParameters;
use crate::bond::schedule::CashFlowPeriod;
use crate::bond::solver::{YieldResult, YieldStatus};
use crate::config::EngineConfig;
use crate::time_value::round_money;
use crate::types::{Money, Rate};

/// Market price relative to face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceRelativeToFace {
    Discount,
    AtPar,
    Premium,
}

/// Summary of yield metrics for one bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondSummary {
    /// Annual coupon / market price; `null` when undefined
    pub current_yield: Option<Rate>,
    /// Annualized yield to maturity; `null` when no root could be found
    pub yield_to_maturity: Option<Rate>,
    /// Final cumulative interest of the schedule
    pub total_interest_earned: Money,
    pub price_relative_to_face: PriceRelativeToFace,
    pub ytm_status: YieldStatus,
}

/// Direct comparison of the rounded market price against the rounded face
/// value. There is no tolerance band.
pub fn classify_price(market_price: Money, face_value: Money, decimal_places: u32) -> PriceRelativeToFace {
    let price = round_money(market_price, decimal_places);
    let face = round_money(face_value, decimal_places);
    match price.cmp(&face) {
        std::cmp::Ordering::Less => PriceRelativeToFace::Discount,
        std::cmp::Ordering::Equal => PriceRelativeToFace::AtPar,
        std::cmp::Ordering::Greater => PriceRelativeToFace::Premium,
    }
}

/// Combine the schedule and yield results into the final summary.
pub fn aggregate(
    params: &BondParameters,
    schedule: &[CashFlowPeriod],
    yields: &YieldResult,
    config: &EngineConfig,
) -> BondSummary {
    let total_interest_earned = schedule
        .last()
        .map(|p| p.cumulative_interest)
        .unwrap_or(Decimal::ZERO);

    BondSummary {
        current_yield: yields.current_yield,
        yield_to_maturity: yields.yield_to_maturity,
        total_interest_earned,
        price_relative_to_face: classify_price(
            params.market_price,
            params.face_value,
            config.decimal_places,
        ),
        ytm_status: yields.ytm_status.clone(),
    }
}
