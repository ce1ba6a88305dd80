use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency amounts: face value, price, coupons and principal.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// Envelope returned by every top-level computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    /// Conventions and solver settings in force for this run
    pub assumptions: serde_json::Value,
    /// Degraded-but-successful conditions, e.g. an undefined yield
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Wrap a result in the output envelope, stamping crate version and timing.
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_wire_names() {
        let out = with_metadata("m", &serde_json::json!({"k": 1}), vec![], 7, 42u32);
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["result"], 42);
        assert_eq!(json["assumptions"]["k"], 1);
        assert_eq!(json["metadata"]["computationTimeUs"], 7);
    }
}
