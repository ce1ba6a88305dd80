use serde_json::Value;
use std::io;

use super::{cash_flow_cells, cash_flow_rows, format_scalar, CASH_FLOW_COLUMNS};

/// Write the cash-flow schedule as CSV to stdout, one row per period.
/// Falls back to field/value pairs when there is no schedule to print.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match cash_flow_rows(value) {
        Some(rows) => write_schedule(&mut wtr, rows),
        None => write_fields(&mut wtr, value),
    }

    let _ = wtr.flush();
}

fn write_schedule<W: io::Write>(wtr: &mut csv::Writer<W>, rows: &[Value]) {
    let _ = wtr.write_record(CASH_FLOW_COLUMNS.iter().map(|(key, _)| *key));
    for row in rows {
        let _ = wtr.write_record(cash_flow_cells(row));
    }
}

fn write_fields<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) {
    let _ = wtr.write_record(["field", "value"]);
    if let Value::Object(map) = value {
        for (key, val) in map {
            let _ = wtr.write_record([key.as_str(), &format_scalar(val)]);
        }
    } else {
        let _ = wtr.write_record(["value", &format_scalar(value)]);
    }
}
