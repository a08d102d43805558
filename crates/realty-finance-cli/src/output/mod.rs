pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use serde_json::Value;

use realty_finance_core::round_display;

use crate::config::CliConfig;
use crate::OutputFormat;

/// Dispatch output to the appropriate formatter.
pub fn format_output(config: &CliConfig, value: &Value) {
    match config.output {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value, config.decimals),
        OutputFormat::Csv => csv_out::print_csv(value, config.decimals),
        OutputFormat::Minimal => minimal::print_minimal(value, config.decimals),
    }
}

/// Render a number for people: floats rounded to `decimals`, integers as-is.
pub(crate) fn format_number(n: &serde_json::Number, decimals: u32) -> String {
    if n.is_f64() {
        n.as_f64()
            .map(|f| format!("{:.*}", decimals as usize, round_display(f, decimals)))
            .unwrap_or_else(|| n.to_string())
    } else {
        n.to_string()
    }
}

/// Scalar rendering shared by the human-facing formatters.
pub(crate) fn format_scalar(value: &Value, decimals: u32) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => format_number(n, decimals),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_number_rounds_floats() {
        let v = json!(1251.558925);
        assert_eq!(format_scalar(&v, 2), "1251.56");
        assert_eq!(format_scalar(&v, 0), "1252");
        assert_eq!(format_scalar(&json!(1.7), 2), "1.70");
    }

    #[test]
    fn test_format_number_keeps_integers() {
        assert_eq!(format_scalar(&json!(300), 2), "300");
    }

    #[test]
    fn test_format_scalar_other_values() {
        assert_eq!(format_scalar(&json!("Caution"), 2), "Caution");
        assert_eq!(format_scalar(&Value::Null, 2), "");
        assert_eq!(format_scalar(&json!(true), 2), "true");
    }
}
