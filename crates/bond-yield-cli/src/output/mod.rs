pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Schedule columns in display order: (JSON key, header).
pub const CASH_FLOW_COLUMNS: [(&str, &str); 7] = [
    ("period", "Period"),
    ("paymentDate", "Payment Date"),
    ("couponPayment", "Coupon"),
    ("principalPayment", "Principal"),
    ("totalCashFlow", "Total Cash Flow"),
    ("cumulativeInterest", "Cumulative Interest"),
    ("remainingPrincipal", "Remaining Principal"),
];

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Pretty-print JSON to stdout.
fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

/// Schedule rows of a quote envelope, or the value itself when the command
/// printed a bare schedule.
pub fn cash_flow_rows(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Array(rows) => Some(rows),
        _ => value.pointer("/result/cashFlows").and_then(Value::as_array),
    }
}

/// One row of cells, in `CASH_FLOW_COLUMNS` order.
pub fn cash_flow_cells(row: &Value) -> Vec<String> {
    CASH_FLOW_COLUMNS
        .iter()
        .map(|(key, _)| row.get(*key).map(format_scalar).unwrap_or_default())
        .collect()
}

/// Render a JSON value as a plain cell. Undefined yields print as "-".
pub fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rows_from_envelope_and_bare_schedule() {
        let envelope = json!({"result": {"cashFlows": [{"period": 1}]}});
        assert_eq!(cash_flow_rows(&envelope).unwrap().len(), 1);

        let bare = json!([{"period": 1}, {"period": 2}]);
        assert_eq!(cash_flow_rows(&bare).unwrap().len(), 2);

        assert!(cash_flow_rows(&json!({"result": {}})).is_none());
    }

    #[test]
    fn test_cells_follow_column_order() {
        let row = json!({
            "remainingPrincipal": 800.0,
            "period": 1,
            "paymentDate": "2026-01-15",
            "couponPayment": 50.0,
            "principalPayment": 200.0,
            "totalCashFlow": 250.0,
            "cumulativeInterest": 50.0
        });
        let cells = cash_flow_cells(&row);
        assert_eq!(cells[0], "1");
        assert_eq!(cells[1], "2026-01-15");
        assert_eq!(cells[6], "800.0");
    }

    #[test]
    fn test_null_renders_as_dash() {
        assert_eq!(format_scalar(&Value::Null), "-");
    }
}
