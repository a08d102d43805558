use napi::Result as NapiResult;
use napi_derive::napi;

use realty_finance_core::normalize::NumericInput;
use realty_finance_core::{amortization, dscr, normalize, project};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_numeric(value_json: &str) -> NapiResult<NumericInput> {
    serde_json::from_str(value_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// `value_json` is a JSON number, string or null, e.g. `"\"100,50\""`.
#[napi]
pub fn normalize_number(value_json: String) -> NapiResult<f64> {
    Ok(normalize::normalize(&parse_numeric(&value_json)?))
}

/// Form edit rule: empty clears the field (null), anything else is normalized.
#[napi]
pub fn parse_field(raw: String) -> Option<f64> {
    normalize::parse_field(&raw)
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, years: f64) -> f64 {
    amortization::monthly_payment(principal, annual_rate_percent, years)
}

// ---------------------------------------------------------------------------
// DSCR
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_dscr(monthly_rent: f64, monthly_expenses: f64, monthly_debt_payment: f64) -> f64 {
    dscr::dscr(monthly_rent, monthly_expenses, monthly_debt_payment)
}

/// Returns the tier name: "Danger", "Caution" or "Comfortable".
#[napi]
pub fn classify_dscr(ratio: f64) -> String {
    dscr::classify(ratio).to_string()
}

#[napi]
pub fn dscr_message(ratio: f64) -> String {
    dscr::classify(ratio).message().to_string()
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// Project record with payment recomputed and expenses estimated.
#[napi]
pub fn recompute_project(project_json: String) -> NapiResult<String> {
    let input: project::Project = serde_json::from_str(&project_json).map_err(to_napi_error)?;
    serde_json::to_string(&input.recompute_monthly()).map_err(to_napi_error)
}

/// Fails when the project has no positive monthly payment yet.
#[napi]
pub fn evaluate_project_dscr(
    project_json: String,
    rent_json: String,
    charges_json: String,
) -> NapiResult<String> {
    let input: project::Project = serde_json::from_str(&project_json).map_err(to_napi_error)?;
    let result = project::evaluate_dscr(
        &input,
        &parse_numeric(&rent_json)?,
        &parse_numeric(&charges_json)?,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&result).map_err(to_napi_error)
}

#[napi]
pub fn analyze_project(input_json: String) -> NapiResult<String> {
    let input: project::ProjectAnalysisInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = project::analyze_project(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
