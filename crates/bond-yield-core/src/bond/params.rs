use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BondAnalyticsError;
use crate::types::{Money, Rate, Years};
use crate::BondResult;

/// Coupon payments per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CouponFrequency {
    Annual,
    SemiAnnual,
}

impl CouponFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            CouponFrequency::Annual => 1,
            CouponFrequency::SemiAnnual => 2,
        }
    }

    pub fn months_per_period(self) -> u32 {
        12 / self.periods_per_year()
    }
}

impl fmt::Display for CouponFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CouponFrequency::Annual => write!(f, "ANNUAL"),
            CouponFrequency::SemiAnnual => write!(f, "SEMI_ANNUAL"),
        }
    }
}

impl FromStr for CouponFrequency {
    type Err = BondAnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "annual" | "1" => Ok(CouponFrequency::Annual),
            "semi_annual" | "semiannual" | "2" => Ok(CouponFrequency::SemiAnnual),
            other => Err(BondAnalyticsError::InvalidParameter {
                field: "coupon_frequency".into(),
                reason: format!("Unsupported coupon frequency '{other}' (expected annual or semi-annual)"),
            }),
        }
    }
}

/// Input parameters describing one bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BondParameters {
    /// Par value repaid over the bond's life (typically 1000)
    pub face_value: Money,
    /// Nominal annual coupon rate as a decimal (e.g. 0.05 = 5%)
    pub annual_coupon_rate: Rate,
    /// Current trading price
    pub market_price: Money,
    /// Total remaining life in years
    pub years_to_maturity: Years,
    pub coupon_frequency: CouponFrequency,
    /// Date the schedule counts from. Defaults to today when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

/// Defensive re-check of the input invariants the caller's validator is
/// expected to enforce: face value, market price and years to maturity
/// strictly positive, coupon rate non-negative (zero allowed).
pub fn validate_parameters(params: &BondParameters) -> BondResult<()> {
    if params.face_value <= Decimal::ZERO {
        return Err(BondAnalyticsError::InvalidParameter {
            field: "face_value".into(),
            reason: "Face value must be positive".into(),
        });
    }
    if params.annual_coupon_rate < Decimal::ZERO {
        return Err(BondAnalyticsError::InvalidParameter {
            field: "annual_coupon_rate".into(),
            reason: "Coupon rate cannot be negative".into(),
        });
    }
    if params.market_price <= Decimal::ZERO {
        return Err(BondAnalyticsError::InvalidParameter {
            field: "market_price".into(),
            reason: "Market price must be positive".into(),
        });
    }
    if params.years_to_maturity <= Decimal::ZERO {
        return Err(BondAnalyticsError::InvalidParameter {
            field: "years_to_maturity".into(),
            reason: "Years to maturity must be positive".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn params() -> BondParameters {
        BondParameters {
            face_value: dec!(1000),
            annual_coupon_rate: dec!(0.05),
            market_price: dec!(950),
            years_to_maturity: dec!(5),
            coupon_frequency: CouponFrequency::Annual,
            start_date: None,
        }
    }

    fn rejected_field(p: &BondParameters) -> String {
        match validate_parameters(p) {
            Err(BondAnalyticsError::InvalidParameter { field, .. }) => field,
            other => panic!("Expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_parameters_pass() {
        assert!(validate_parameters(&params()).is_ok());
    }

    #[test]
    fn test_zero_coupon_rate_allowed() {
        let p = BondParameters {
            annual_coupon_rate: Decimal::ZERO,
            ..params()
        };
        assert!(validate_parameters(&p).is_ok());
    }

    #[test]
    fn test_each_bound_is_enforced() {
        let p = BondParameters { face_value: Decimal::ZERO, ..params() };
        assert_eq!(rejected_field(&p), "face_value");

        let p = BondParameters { annual_coupon_rate: dec!(-0.01), ..params() };
        assert_eq!(rejected_field(&p), "annual_coupon_rate");

        let p = BondParameters { market_price: dec!(-5), ..params() };
        assert_eq!(rejected_field(&p), "market_price");

        let p = BondParameters { years_to_maturity: Decimal::ZERO, ..params() };
        assert_eq!(rejected_field(&p), "years_to_maturity");
    }

    #[test]
    fn test_frequency_parsing() {
        assert_eq!("annual".parse::<CouponFrequency>().unwrap(), CouponFrequency::Annual);
        assert_eq!("SEMI_ANNUAL".parse::<CouponFrequency>().unwrap(), CouponFrequency::SemiAnnual);
        assert_eq!("semi-annual".parse::<CouponFrequency>().unwrap(), CouponFrequency::SemiAnnual);
        assert_eq!("2".parse::<CouponFrequency>().unwrap(), CouponFrequency::SemiAnnual);
        assert!("quarterly".parse::<CouponFrequency>().is_err());
    }

    #[test]
    fn test_wire_format_matches_client() {
        let json = r#"{
            "faceValue": 1000,
            "annualCouponRate": 0.05,
            "marketPrice": 950,
            "yearsToMaturity": 5,
            "couponFrequency": "SEMI_ANNUAL"
        }"#;
        let p: BondParameters = serde_json::from_str(json).unwrap();
        assert_eq!(p.face_value, dec!(1000));
        assert_eq!(p.annual_coupon_rate, dec!(0.05));
        assert_eq!(p.coupon_frequency, CouponFrequency::SemiAnnual);
        assert_eq!(p.coupon_frequency.months_per_period(), 6);
        assert!(p.start_date.is_none());
    }
}
