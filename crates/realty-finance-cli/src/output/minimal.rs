use serde_json::Value;

use super::format_scalar;

/// Key result fields, most specific first.
const PRIORITY_KEYS: [&str; 5] = ["ratio", "dscr", "monthly_payment", "value", "financed_principal"];

/// Print just the key answer value from the output.
///
/// A DSCR object prints as its ratio followed by its tier.
pub fn print_minimal(value: &Value, decimals: u32) {
    println!("{}", minimal_line(value, decimals));
}

fn minimal_line(value: &Value, decimals: u32) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let Value::Object(map) = result_obj else {
        return format_scalar(result_obj, decimals);
    };

    for key in PRIORITY_KEYS {
        match map.get(key) {
            Some(Value::Object(inner)) => {
                if let (Some(ratio), Some(tier)) = (inner.get("ratio"), inner.get("tier")) {
                    return format!(
                        "{} {}",
                        format_scalar(ratio, decimals),
                        format_scalar(tier, decimals)
                    );
                }
            }
            Some(val) if !val.is_null() => {
                if key == "ratio" {
                    if let Some(tier) = map.get("tier") {
                        return format!(
                            "{} {}",
                            format_scalar(val, decimals),
                            format_scalar(tier, decimals)
                        );
                    }
                }
                return format_scalar(val, decimals);
            }
            _ => {}
        }
    }

    match map.iter().next() {
        Some((key, val)) => format!("{}: {}", key, format_scalar(val, decimals)),
        None => String::new(),
    }
}
