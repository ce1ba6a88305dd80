use serde_json::Value;

use super::format_scalar;

/// Print just the key answer value from the output.
///
/// For a quote this is the first defined yield in priority order; for a bare
/// schedule it is the total interest paid over the bond's life.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_answer(value));
}

fn minimal_answer(value: &Value) -> String {
    if let Value::Array(rows) = value {
        return rows
            .last()
            .and_then(|row| row.get("cumulativeInterest"))
            .map(format_scalar)
            .unwrap_or_else(|| "0".to_string());
    }

    // Priority list of key summary fields
    let priority_keys = ["yieldToMaturity", "currentYield", "totalInterestEarned"];

    if let Some(Value::Object(summary)) = value.pointer("/result/summary") {
        for key in &priority_keys {
            if let Some(val) = summary.get(*key) {
                if !val.is_null() {
                    return format_scalar(val);
                }
            }
        }
    }

    format_scalar(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prefers_yield_to_maturity() {
        let v = json!({"result": {"summary": {"yieldToMaturity": 0.0694, "currentYield": 0.0526}}});
        assert_eq!(minimal_answer(&v), "0.0694");
    }

    #[test]
    fn test_falls_back_when_ytm_undefined() {
        let v = json!({"result": {"summary": {"yieldToMaturity": null, "currentYield": 0.0}}});
        assert_eq!(minimal_answer(&v), "0.0");
    }

    #[test]
    fn test_schedule_prints_total_interest() {
        let v = json!([{"cumulativeInterest": 50.0}, {"cumulativeInterest": 90.0}]);
        assert_eq!(minimal_answer(&v), "90.0");
    }
}
