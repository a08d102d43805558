use clap::Args;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

use realty_finance_core::dscr::{CashFlow, DscrTier};
use realty_finance_core::normalize::{normalize, NumericInput};
use realty_finance_core::with_metadata;

use crate::input;

/// Arguments for the debt service coverage ratio
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct DscrArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly rental income
    #[arg(long)]
    pub rent: Option<String>,

    /// Monthly operating expenses, excluding the loan
    #[arg(long)]
    pub expenses: Option<String>,

    /// Monthly loan payment
    #[arg(long)]
    pub payment: Option<String>,
}

/// Cash flow fields as entered, before normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCashFlowInput {
    pub monthly_rent: NumericInput,
    pub monthly_expenses: NumericInput,
    pub monthly_debt_payment: NumericInput,
}

impl RawCashFlowInput {
    fn to_cash_flow(&self) -> CashFlow {
        CashFlow {
            monthly_rent: normalize(&self.monthly_rent),
            monthly_expenses: normalize(&self.monthly_expenses),
            monthly_debt_payment: normalize(&self.monthly_debt_payment),
        }
    }
}

#[derive(Debug, Serialize)]
struct DscrOutput {
    ratio: f64,
    tier: DscrTier,
    message: &'static str,
    monthly_noi: f64,
    annual_noi: f64,
    annual_debt_service: f64,
}

pub fn run_dscr(args: DscrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let raw: RawCashFlowInput = match (&args.input, &args.rent, &args.payment) {
        (None, Some(rent), Some(payment)) => RawCashFlowInput {
            monthly_rent: rent.as_str().into(),
            monthly_expenses: args.expenses.clone().into(),
            monthly_debt_payment: payment.as_str().into(),
        },
        _ => input::read_input(args.input.as_deref())?
            .ok_or("--rent and --payment are required (or provide --input)")?,
    };

    let start = Instant::now();
    let cash_flow = raw.to_cash_flow();
    let result = cash_flow.evaluate();
    debug!(?cash_flow, ratio = result.ratio, tier = %result.tier, "computed DSCR");

    let mut warnings = Vec::new();
    if cash_flow.monthly_debt_payment <= 0.0 {
        warnings.push(
            "Monthly payment is zero or missing: a ratio of 0 here does not mean no risk"
                .to_string(),
        );
    }
    if cash_flow.monthly_noi() < 0.0 {
        warnings.push("Expenses exceed rent: negative operating income".to_string());
    }

    let output = with_metadata(
        "Debt service coverage ratio (annual NOI / annual debt service)",
        &cash_flow,
        warnings,
        start.elapsed().as_micros() as u64,
        DscrOutput {
            ratio: result.ratio,
            tier: result.tier,
            message: result.message(),
            monthly_noi: cash_flow.monthly_noi(),
            annual_noi: cash_flow.annual_noi(),
            annual_debt_service: cash_flow.annual_debt_service(),
        },
    );
    Ok(serde_json::to_value(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(rent: &str, expenses: Option<&str>, payment: &str) -> DscrArgs {
        DscrArgs {
            input: None,
            rent: Some(rent.into()),
            expenses: expenses.map(Into::into),
            payment: Some(payment.into()),
        }
    }

    #[test]
    fn test_dscr_from_flags() {
        let out = run_dscr(flags("2000", Some("300"), "1000")).unwrap();
        let ratio = out["result"]["ratio"].as_f64().unwrap();
        assert!((ratio - 1.7).abs() < 1e-9);
        assert_eq!(out["result"]["tier"], "Comfortable");
        assert_eq!(out["result"]["annual_noi"], 20_400.0);
        assert!(out["warnings"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_zero_payment_warns() {
        let out = run_dscr(flags("2000", None, "0")).unwrap();
        assert_eq!(out["result"]["ratio"], 0.0);
        assert_eq!(out["result"]["tier"], "Danger");
        assert_eq!(out["warnings"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_negative_noi() {
        let out = run_dscr(flags("1000", Some("2000"), "500")).unwrap();
        let ratio = out["result"]["ratio"].as_f64().unwrap();
        assert!((ratio - -2.0).abs() < 1e-9);
        assert!(out["warnings"][0].as_str().unwrap().contains("negative"));
    }
}
