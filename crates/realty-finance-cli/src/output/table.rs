use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::format_scalar;

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value, decimals: u32) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => print_result_table(result, map, decimals),
            _ => println!("{}", field_table(map, decimals)),
        },
        _ => println!("{}", format_scalar(value, decimals)),
    }
}

fn print_result_table(result: &Map<String, Value>, envelope: &Map<String, Value>, decimals: u32) {
    println!("{}", field_table(result, decimals));

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Two-column Field/Value table. Nested objects are flattened with dotted keys.
fn field_table(map: &Map<String, Value>, decimals: u32) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten(map) {
        builder.push_record([key, format_scalar(&val, decimals)]);
    }
    builder.build()
}

pub(crate) fn flatten(map: &Map<String, Value>) -> Vec<(String, Value)> {
    let mut rows = Vec::new();
    for (key, val) in map {
        match val {
            Value::Object(inner) => {
                for (inner_key, inner_val) in flatten(inner) {
                    rows.push((format!("{key}.{inner_key}"), inner_val));
                }
            }
            _ => rows.push((key.clone(), val.clone())),
        }
    }
    rows
}
