use clap::Args;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

use realty_finance_core::amortization::LoanTerms;
use realty_finance_core::normalize::{normalize, NumericInput};
use realty_finance_core::with_metadata;

use crate::input;

/// Arguments for the monthly payment calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PaymentArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<String>,

    /// Annual interest rate in percent, e.g. 3,5
    #[arg(long)]
    pub rate: Option<String>,

    /// Loan duration in years
    #[arg(long)]
    pub years: Option<String>,
}

/// Loan fields as entered, before normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLoanInput {
    pub principal: NumericInput,
    pub rate: NumericInput,
    pub years: NumericInput,
}

impl RawLoanInput {
    fn to_terms(&self) -> LoanTerms {
        LoanTerms::new(
            normalize(&self.principal),
            normalize(&self.rate),
            normalize(&self.years),
        )
    }
}

#[derive(Debug, Serialize)]
struct PaymentResult {
    monthly_payment: f64,
    total_months: f64,
    monthly_rate: f64,
    total_repaid: f64,
    total_interest: f64,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let raw: RawLoanInput = match (&args.input, &args.principal, &args.years) {
        (None, Some(principal), Some(years)) => RawLoanInput {
            principal: principal.as_str().into(),
            rate: args.rate.clone().into(),
            years: years.as_str().into(),
        },
        _ => input::read_input(args.input.as_deref())?
            .ok_or("--principal and --years are required (or provide --input)")?,
    };

    let start = Instant::now();
    let terms = raw.to_terms();
    let monthly_payment = terms.monthly_payment();
    debug!(?terms, monthly_payment, "computed monthly payment");

    let mut warnings = Vec::new();
    if monthly_payment == 0.0 {
        warnings.push("Principal or duration is zero: no payment due".to_string());
    }
    if terms.annual_rate_percent < 0.0 {
        warnings.push(format!(
            "Negative rate {}% gives a payment below straight-line",
            terms.annual_rate_percent
        ));
    }

    // No payment means nothing is borrowed or repaid
    let (total_months, financed) = if monthly_payment > 0.0 {
        (terms.total_months(), terms.principal)
    } else {
        (0.0, 0.0)
    };
    let total_repaid = monthly_payment * total_months;
    let result = PaymentResult {
        monthly_payment,
        total_months,
        monthly_rate: terms.monthly_rate(),
        total_repaid,
        total_interest: total_repaid - financed,
    };

    let output = with_metadata(
        "Fixed-rate amortization (annuity formula)",
        &terms,
        warnings,
        start.elapsed().as_micros() as u64,
        result,
    );
    Ok(serde_json::to_value(output)?)
}
