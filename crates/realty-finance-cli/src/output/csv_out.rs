use serde_json::Value;
use std::io::{self, Write};

use super::format_scalar;
use super::table::flatten;

/// Write output as two-column CSV (field, value) to stdout.
pub fn print_csv(value: &Value, decimals: u32) {
    let stdout = io::stdout();
    write_csv(stdout.lock(), value, decimals);
}

fn write_csv<W: Write>(writer: W, value: &Value, decimals: u32) {
    let mut wtr = csv::Writer::from_writer(writer);

    let fields = match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => result,
            _ => map,
        },
        _ => {
            let _ = wtr.write_record([format_scalar(value, decimals)]);
            let _ = wtr.flush();
            return;
        }
    };

    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in flatten(fields) {
        let _ = wtr.write_record([key, format_scalar(&val, decimals)]);
    }
    let _ = wtr.flush();
}
