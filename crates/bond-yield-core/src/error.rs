use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BondAnalyticsError {
    #[error("Invalid parameter: {field} — {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("Invalid schedule: {periods} coupon periods computed ({reason})")]
    InvalidSchedule { periods: i64, reason: String },

    #[error("Yield not found: {reason} (search bracket [{lower}, {upper}])")]
    YieldNotFound {
        reason: String,
        lower: Decimal,
        upper: Decimal,
    },

    #[error("Numeric overflow in {context}")]
    NumericOverflow { context: String },
}

impl BondAnalyticsError {
    /// Whether the engine degrades a single output field on this error
    /// instead of aborting the whole computation.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, BondAnalyticsError::YieldNotFound { .. })
    }

    pub(crate) fn overflow(context: impl Into<String>) -> Self {
        BondAnalyticsError::NumericOverflow {
            context: context.into(),
        }
    }
}
