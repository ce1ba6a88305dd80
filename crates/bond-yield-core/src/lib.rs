pub mod bond;
pub mod config;
pub mod error;
pub mod time_value;
pub mod types;

pub use config::{AmortizationPolicy, EngineConfig};
pub use error::BondAnalyticsError;
pub use types::*;

/// Standard result type for all bond analytics operations
pub type BondResult<T> = Result<T, BondAnalyticsError>;
