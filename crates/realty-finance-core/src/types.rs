use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Monetary amounts. Calculations run in double precision; see [`round_display`]
/// for the rounding applied when presenting them.
pub type Money = f64;

/// Rates expressed as percentages (3.5 = 3.5%), the way they are typed in.
pub type Percent = f64;

/// Coverage ratios (e.g. 1.35x DSCR)
pub type Ratio = f64;

/// Loan duration in years. May be fractional.
pub type Years = f64;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
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
            precision: "f64_ieee754_double".to_string(),
        },
    }
}

/// Round a computed figure for display, half away from zero.
///
/// Non-finite values have no decimal representation and display as zero.
pub fn round_display(value: f64, decimals: u32) -> Decimal {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_display_two_places() {
        assert_eq!(round_display(1251.5583, 2), dec!(1251.56));
        assert_eq!(round_display(1.7, 2), dec!(1.70));
        assert_eq!(round_display(-2.0, 2), dec!(-2));
    }

    #[test]
    fn test_round_display_non_finite() {
        assert_eq!(round_display(f64::NAN, 2), Decimal::ZERO);
        assert_eq!(round_display(f64::INFINITY, 2), Decimal::ZERO);
    }

    #[test]
    fn test_with_metadata_envelope() {
        let out = with_metadata("Test", &serde_json::json!({"a": 1}), vec![], 5, 42.0);
        assert_eq!(out.result, 42.0);
        assert_eq!(out.methodology, "Test");
        assert_eq!(out.metadata.computation_time_us, 5);
        assert_eq!(out.assumptions["a"], 1);
    }
}
