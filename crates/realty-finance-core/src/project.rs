use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::{acquisition_principal, LoanTerms};
use crate::dscr::{CashFlow, DscrResult, DSCR_COMFORT_FLOOR};
use crate::error::CoreError;
use crate::normalize::{normalize, parse_field, try_normalize, NumericInput};
use crate::types::{with_metadata, ComputationOutput, Money, Ratio};
use crate::CoreResult;

/// Share of the monthly payment assumed for operating expenses when the
/// payment is recomputed.
pub const DEFAULT_EXPENSE_RATIO: Ratio = 0.10;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A stored acquisition scenario. Every figure is optional: a half-filled
/// project is the normal state while it is being edited.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    /// Opaque identifier assigned by the storage layer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub postal_code: Option<String>,
    pub description: Option<String>,
    /// Purchase price
    pub price: Option<Money>,
    pub notary_fees: Option<Money>,
    /// Renovation budget
    pub works: Option<Money>,
    /// Annual loan rate as a percentage
    pub loan_rate: Option<f64>,
    pub loan_years: Option<f64>,
    /// Monthly borrower insurance, not financed
    pub insurance: Option<Money>,
    pub brokerage_fees: Option<Money>,
    pub monthly_expenses: Option<Money>,
    pub monthly_payment: Option<Money>,
}

/// Numeric fields editable through [`Project::apply_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectField {
    Price,
    NotaryFees,
    Works,
    LoanRate,
    LoanYears,
    Insurance,
    BrokerageFees,
    MonthlyExpenses,
    MonthlyPayment,
}

/// Free-text fields editable through [`Project::apply_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    Name,
    PostalCode,
    Description,
}

impl Project {
    /// Price + notary fees + works + brokerage fees; missing amounts count as 0.
    pub fn financed_principal(&self) -> Money {
        acquisition_principal(
            &self.price.into(),
            &self.notary_fees.into(),
            &self.works.into(),
            &self.brokerage_fees.into(),
        )
    }

    pub fn loan_terms(&self) -> LoanTerms {
        LoanTerms::new(
            self.financed_principal(),
            normalize(&self.loan_rate.into()),
            normalize(&self.loan_years.into()),
        )
    }

    pub fn compute_monthly_payment(&self) -> Money {
        self.loan_terms().monthly_payment()
    }

    /// Copy of the project with the payment recomputed and operating
    /// expenses estimated at [`DEFAULT_EXPENSE_RATIO`] of it.
    pub fn recompute_monthly(&self) -> Project {
        self.recompute_monthly_with_ratio(DEFAULT_EXPENSE_RATIO)
    }

    /// When the recomputed payment is 0 the stored expenses are kept
    /// (normalized, missing becomes 0).
    pub fn recompute_monthly_with_ratio(&self, expense_ratio: Ratio) -> Project {
        let payment = self.compute_monthly_payment();
        let monthly_expenses = if payment > 0.0 {
            payment * expense_ratio
        } else {
            normalize(&self.monthly_expenses.into())
        };

        Project {
            monthly_payment: Some(payment),
            monthly_expenses: Some(monthly_expenses),
            ..self.clone()
        }
    }

    /// Set a numeric field from raw form text. Empty text clears it.
    pub fn apply_field(&mut self, field: ProjectField, raw: &str) {
        let value = parse_field(raw);
        let slot = match field {
            ProjectField::Price => &mut self.price,
            ProjectField::NotaryFees => &mut self.notary_fees,
            ProjectField::Works => &mut self.works,
            ProjectField::LoanRate => &mut self.loan_rate,
            ProjectField::LoanYears => &mut self.loan_years,
            ProjectField::Insurance => &mut self.insurance,
            ProjectField::BrokerageFees => &mut self.brokerage_fees,
            ProjectField::MonthlyExpenses => &mut self.monthly_expenses,
            ProjectField::MonthlyPayment => &mut self.monthly_payment,
        };
        *slot = value;
    }

    pub fn apply_text(&mut self, field: TextField, value: &str) {
        let slot = match field {
            TextField::Name => &mut self.name,
            TextField::PostalCode => &mut self.postal_code,
            TextField::Description => &mut self.description,
        };
        *slot = Some(value.to_string());
    }
}

/// DSCR of a project from the rent and charges typed by the user.
///
/// Unlike [`crate::dscr::dscr`], a missing or non-positive stored payment
/// is an error: the ratio would otherwise read as 0.
pub fn evaluate_dscr(
    project: &Project,
    monthly_rent: &NumericInput,
    monthly_charges: &NumericInput,
) -> CoreResult<DscrResult> {
    let payment = normalize(&project.monthly_payment.into());
    if payment <= 0.0 {
        return Err(CoreError::MissingDebtPayment);
    }

    let cash_flow = CashFlow {
        monthly_rent: normalize(monthly_rent),
        monthly_expenses: normalize(monthly_charges),
        monthly_debt_payment: payment,
    };
    Ok(cash_flow.evaluate())
}

// ---------------------------------------------------------------------------
// One-shot analysis
// ---------------------------------------------------------------------------

/// Input for a complete acquisition analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectAnalysisInput {
    pub project: Project,
    /// Expected monthly rent; DSCR is skipped when absent
    #[serde(default)]
    pub monthly_rent: NumericInput,
    /// Monthly operating charges; the estimated expenses are used when absent
    #[serde(default)]
    pub monthly_charges: NumericInput,
    /// Overrides [`DEFAULT_EXPENSE_RATIO`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_ratio: Option<Ratio>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectAnalysisOutput {
    /// Price plus acquisition costs
    pub financed_principal: Money,
    pub loan: LoanTerms,
    pub monthly_payment: Money,
    /// 12 * monthly payment
    pub annual_debt_service: Money,
    /// Charges used for the DSCR (entered, or estimated from the payment)
    pub monthly_expenses: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_rent: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dscr: Option<DscrResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dscr_message: Option<String>,
    /// The project with recomputed payment and expenses, ready to store
    pub project: Project,
}

/// Financed amount, payment, estimated expenses and, when rent is given,
/// the DSCR of an acquisition.
pub fn analyze_project(
    input: &ProjectAnalysisInput,
) -> CoreResult<ComputationOutput<ProjectAnalysisOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let expense_ratio = input.expense_ratio.unwrap_or(DEFAULT_EXPENSE_RATIO);
    if !(0.0..=1.0).contains(&expense_ratio) {
        return Err(CoreError::InvalidInput {
            field: "expense_ratio".into(),
            reason: "Expense ratio must be between 0 and 1".into(),
        });
    }

    let loan = input.project.loan_terms();
    let updated = input.project.recompute_monthly_with_ratio(expense_ratio);
    let monthly_payment = updated.monthly_payment.unwrap_or_default();

    if loan.principal <= 0.0 {
        warnings.push("Financed principal is zero: enter a price or acquisition costs".into());
    }
    if loan.years <= 0.0 {
        warnings.push("Loan duration is missing or zero: no payment computed".into());
    }
    if loan.annual_rate_percent == 0.0 && monthly_payment > 0.0 {
        warnings.push("Zero interest rate: payment is straight-line principal only".into());
    }

    let monthly_rent = lenient("monthly_rent", &input.monthly_rent, &mut warnings);
    let monthly_expenses = match lenient("monthly_charges", &input.monthly_charges, &mut warnings) {
        Some(charges) => charges,
        None => updated.monthly_expenses.unwrap_or_default(),
    };

    let dscr = match monthly_rent {
        Some(rent) if monthly_payment > 0.0 => Some(
            CashFlow {
                monthly_rent: rent,
                monthly_expenses,
                monthly_debt_payment: monthly_payment,
            }
            .evaluate(),
        ),
        Some(_) => {
            warnings.push("DSCR not computed: the monthly payment is zero".into());
            None
        }
        None => None,
    };

    if let Some(result) = dscr {
        if result.ratio < DSCR_COMFORT_FLOOR {
            warnings.push(format!(
                "DSCR of {:.2} is below {:.2}x: lender covenant risk",
                result.ratio, DSCR_COMFORT_FLOOR
            ));
        }
    }

    let output = ProjectAnalysisOutput {
        financed_principal: loan.principal,
        loan,
        monthly_payment,
        annual_debt_service: monthly_payment * 12.0,
        monthly_expenses,
        monthly_rent,
        dscr_message: dscr.map(|d| d.message().to_string()),
        dscr,
        project: updated,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Fixed-rate amortization and debt service coverage",
        input,
        warnings,
        elapsed,
        output,
    ))
}

/// Strict parse that degrades to 0 with a warning instead of failing.
fn lenient(field: &str, value: &NumericInput, warnings: &mut Vec<String>) -> Option<f64> {
    match try_normalize(value) {
        Ok(v) => v,
        Err(e) => {
            warnings.push(format!("{field}: {e}; treated as 0"));
            Some(0.0)
        }
    }
}
