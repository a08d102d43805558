use serde::{Deserialize, Serialize};

use crate::normalize::{normalize, NumericInput};
use crate::types::{Money, Percent, Years};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Fixed-rate, fully amortizing loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed
    pub principal: Money,
    /// Nominal annual rate as a percentage (3.5 = 3.5%)
    pub annual_rate_percent: Percent,
    /// Loan duration in years
    pub years: Years,
}

impl LoanTerms {
    pub fn new(principal: Money, annual_rate_percent: Percent, years: Years) -> Self {
        Self {
            principal,
            annual_rate_percent,
            years,
        }
    }

    /// Periodic rate as a decimal fraction per month
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / 12.0
    }

    /// Number of monthly payments. Not rounded: fractional years give a
    /// fractional count.
    pub fn total_months(&self) -> f64 {
        self.years * 12.0
    }

    pub fn monthly_payment(&self) -> Money {
        monthly_payment(self.principal, self.annual_rate_percent, self.years)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Standard fixed-rate payment: P * r / (1 - (1 + r)^-n)
///
/// Returns 0 when there is nothing to borrow or no term. A zero rate
/// amortizes straight-line. The result is not rounded.
pub fn monthly_payment(principal: Money, annual_rate_percent: Percent, years: Years) -> Money {
    if principal <= 0.0 || years <= 0.0 {
        return 0.0;
    }

    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    let n = years * 12.0;

    if monthly_rate == 0.0 {
        return principal / n;
    }

    principal * (monthly_rate / (1.0 - (1.0 + monthly_rate).powf(-n)))
}

/// Amount to finance for an acquisition: price plus notary fees, works and
/// brokerage fees. Borrower insurance is paid separately and is not included.
pub fn acquisition_principal(
    price: &NumericInput,
    notary_fees: &NumericInput,
    works: &NumericInput,
    brokerage_fees: &NumericInput,
) -> Money {
    normalize(price) + normalize(notary_fees) + normalize(works) + normalize(brokerage_fees)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_loan() {
        // 250k at 3.5% over 25 years, ~1251.56/month
        let payment = monthly_payment(250_000.0, 3.5, 25.0);
        assert!(
            (payment - 1251.56).abs() < 0.1,
            "Monthly payment {payment} outside expected range"
        );
    }

    #[test]
    fn test_zero_principal() {
        assert_eq!(monthly_payment(0.0, 3.5, 25.0), 0.0);
        assert_eq!(monthly_payment(-10_000.0, 3.5, 25.0), 0.0);
    }

    #[test]
    fn test_zero_years() {
        assert_eq!(monthly_payment(250_000.0, 3.5, 0.0), 0.0);
        assert_eq!(monthly_payment(250_000.0, 3.5, -1.0), 0.0);
    }

    #[test]
    fn test_zero_rate_straight_line() {
        // 250000 / 300 months
        assert_eq!(monthly_payment(250_000.0, 0.0, 25.0), 250_000.0 / 300.0);
    }

    #[test]
    fn test_fractional_years() {
        // 18 months, interest-free
        assert_eq!(monthly_payment(1_800.0, 0.0, 1.5), 100.0);
    }

    #[test]
    fn test_negative_rate_is_defined() {
        let payment = monthly_payment(120_000.0, -1.0, 10.0);
        assert!(payment.is_finite());
        assert!(payment < 1_000.0, "Negative rate should pay less than straight-line");
    }

    #[test]
    fn test_payment_exceeds_straight_line_for_positive_rate() {
        let payment = monthly_payment(300_000.0, 4.0, 20.0);
        assert!(payment > 300_000.0 / 240.0);
    }

    #[test]
    fn test_loan_terms_delegates() {
        let terms = LoanTerms::new(250_000.0, 3.5, 25.0);
        assert_eq!(terms.total_months(), 300.0);
        assert!((terms.monthly_rate() - 0.035 / 12.0).abs() < 1e-15);
        assert_eq!(terms.monthly_payment(), monthly_payment(250_000.0, 3.5, 25.0));
    }

    #[test]
    fn test_acquisition_principal_sums_costs() {
        let principal = acquisition_principal(
            &200_000.0_f64.into(),
            &"15000,50".into(),
            &NumericInput::Missing,
            &"".into(),
        );
        assert_eq!(principal, 215_000.5);
    }
}
