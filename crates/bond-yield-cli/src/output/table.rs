use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{cash_flow_cells, cash_flow_rows, format_scalar, CASH_FLOW_COLUMNS};

/// Summary fields in display order: (JSON key, label).
const SUMMARY_FIELDS: [(&str, &str); 4] = [
    ("currentYield", "Current Yield"),
    ("yieldToMaturity", "Yield to Maturity"),
    ("totalInterestEarned", "Total Interest Earned"),
    ("priceRelativeToFace", "Price vs Face"),
];

/// Format a quote (or a bare schedule) as tables using the tabled crate.
pub fn print_table(value: &Value) {
    if let Some(summary) = value.pointer("/result/summary") {
        print_summary_table(summary);
        println!();
    }

    match cash_flow_rows(value) {
        Some(rows) if !rows.is_empty() => println!("{}", build_cash_flow_table(rows)),
        Some(_) => println!("(empty schedule)"),
        None => println!("{}", value),
    }

    // Print warnings if any
    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_summary_table(summary: &Value) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, label) in SUMMARY_FIELDS {
        let cell = summary.get(key).map(format_scalar).unwrap_or_default();
        builder.push_record([label.to_string(), cell]);
    }
    if let Some(status) = summary.get("ytmStatus") {
        builder.push_record(["YTM Status".to_string(), describe_status(status)]);
    }
    println!("{}", Table::from(builder));
}

fn build_cash_flow_table(rows: &[Value]) -> Table {
    let mut builder = Builder::default();
    builder.push_record(CASH_FLOW_COLUMNS.iter().map(|(_, header)| header.to_string()));
    for row in rows {
        builder.push_record(cash_flow_cells(row));
    }
    Table::from(builder)
}

/// "CONVERGED (NEWTON_RAPHSON, 4 iterations)" or "NOT_FOUND: <reason>".
fn describe_status(status: &Value) -> String {
    let tag = status.get("status").map(format_scalar).unwrap_or_default();
    if let Some(reason) = status.get("reason") {
        return format!("{}: {}", tag, format_scalar(reason));
    }
    match (status.get("method"), status.get("iterations")) {
        (Some(method), Some(iterations)) => format!(
            "{} ({}, {} iterations)",
            tag,
            format_scalar(method),
            format_scalar(iterations)
        ),
        _ => tag,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_describe_converged_status() {
        let status = json!({"status": "CONVERGED", "method": "BISECTION", "iterations": 31});
        assert_eq!(describe_status(&status), "CONVERGED (BISECTION, 31 iterations)");
    }

    #[test]
    fn test_describe_not_found_status() {
        let status = json!({"status": "NOT_FOUND", "reason": "no bracket"});
        assert_eq!(describe_status(&status), "NOT_FOUND: no bracket");
    }

    #[test]
    fn test_cash_flow_table_has_all_columns() {
        let rows = vec![json!({"period": 1, "paymentDate": "2026-01-15"})];
        let rendered = build_cash_flow_table(&rows).to_string();
        assert!(rendered.contains("Remaining Principal"));
        assert!(rendered.contains("2026-01-15"));
    }
}
