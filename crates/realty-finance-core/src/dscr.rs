use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Money, Ratio};

/// Ratios at or above this floor cover their debt service.
pub const DSCR_CAUTION_FLOOR: Ratio = 1.0;

/// Ratios at or above this floor carry a comfortable margin.
pub const DSCR_COMFORT_FLOOR: Ratio = 1.2;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Risk reading of a debt service coverage ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DscrTier {
    /// Below 1.0x: income does not cover the loan
    Danger,
    /// 1.0x to 1.2x: covered, with a thin margin
    Caution,
    /// 1.2x and above
    Comfortable,
}

impl DscrTier {
    pub fn message(&self) -> &'static str {
        match self {
            DscrTier::Danger => {
                "DSCR < 1: the project does not cover its debt service. This is tight, even risky."
            }
            DscrTier::Caution => {
                "1 <= DSCR < 1.2: the project passes, but the safety margin is thin."
            }
            DscrTier::Comfortable => {
                "DSCR >= 1.2: the project is comfortable in terms of repayment capacity."
            }
        }
    }
}

impl fmt::Display for DscrTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DscrTier::Danger => "Danger",
            DscrTier::Caution => "Caution",
            DscrTier::Comfortable => "Comfortable",
        };
        f.write_str(label)
    }
}

/// Monthly income and outgoings of a rental property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub monthly_rent: Money,
    /// Operating expenses, excluding the loan
    pub monthly_expenses: Money,
    /// Loan payment (principal + interest)
    pub monthly_debt_payment: Money,
}

impl CashFlow {
    pub fn monthly_noi(&self) -> Money {
        self.monthly_rent - self.monthly_expenses
    }

    pub fn annual_noi(&self) -> Money {
        self.monthly_noi() * 12.0
    }

    pub fn annual_debt_service(&self) -> Money {
        self.monthly_debt_payment * 12.0
    }

    pub fn dscr(&self) -> Ratio {
        dscr(
            self.monthly_rent,
            self.monthly_expenses,
            self.monthly_debt_payment,
        )
    }

    pub fn evaluate(&self) -> DscrResult {
        DscrResult::from_ratio(self.dscr())
    }
}

/// A coverage ratio with its tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DscrResult {
    pub ratio: Ratio,
    pub tier: DscrTier,
}

impl DscrResult {
    pub fn from_ratio(ratio: Ratio) -> Self {
        Self {
            ratio,
            tier: classify(ratio),
        }
    }

    pub fn message(&self) -> &'static str {
        self.tier.message()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Debt service coverage ratio: annual NOI / annual debt service.
///
/// A non-positive debt payment yields 0. Callers must check the payment
/// before reading a 0 as "no risk". Negative NOI gives a negative ratio.
pub fn dscr(monthly_rent: Money, monthly_expenses: Money, monthly_debt_payment: Money) -> Ratio {
    if monthly_debt_payment <= 0.0 {
        return 0.0;
    }

    let monthly_noi = monthly_rent - monthly_expenses;
    let annual_noi = monthly_noi * 12.0;
    let annual_debt = monthly_debt_payment * 12.0;

    annual_noi / annual_debt
}

/// Tier of a ratio. Each band includes its lower bound.
pub fn classify(ratio: Ratio) -> DscrTier {
    if ratio < DSCR_CAUTION_FLOOR {
        DscrTier::Danger
    } else if ratio < DSCR_COMFORT_FLOOR {
        DscrTier::Caution
    } else {
        DscrTier::Comfortable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dscr_basic() {
        // NOI 1700/month = 20400/year, debt 12000/year
        let ratio = dscr(2000.0, 300.0, 1000.0);
        assert!((ratio - 1.7).abs() < 0.1);
    }

    #[test]
    fn test_zero_debt_payment() {
        assert_eq!(dscr(2000.0, 300.0, 0.0), 0.0);
        assert_eq!(dscr(2000.0, 300.0, -50.0), 0.0);
    }

    #[test]
    fn test_negative_noi_propagates() {
        // NOI -12000/year, debt 6000/year
        let ratio = dscr(1000.0, 2000.0, 500.0);
        assert!((ratio - -2.0).abs() < 0.1);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(0.8), DscrTier::Danger);
        assert_eq!(classify(0.9999), DscrTier::Danger);
        assert_eq!(classify(1.0), DscrTier::Caution);
        assert_eq!(classify(1.1999), DscrTier::Caution);
        assert_eq!(classify(1.2), DscrTier::Comfortable);
        assert_eq!(classify(1.5), DscrTier::Comfortable);
    }

    #[test]
    fn test_classify_negative_and_zero() {
        assert_eq!(classify(-2.0), DscrTier::Danger);
        assert_eq!(classify(0.0), DscrTier::Danger);
    }

    #[test]
    fn test_messages() {
        assert!(DscrTier::Danger.message().contains("does not cover"));
        assert!(DscrTier::Caution.message().contains("thin"));
        assert!(DscrTier::Comfortable.message().contains("comfortable"));
        assert_eq!(DscrTier::Caution.to_string(), "Caution");
    }

    #[test]
    fn test_cash_flow_evaluate() {
        let cf = CashFlow {
            monthly_rent: 2000.0,
            monthly_expenses: 300.0,
            monthly_debt_payment: 1000.0,
        };
        assert_eq!(cf.monthly_noi(), 1700.0);
        assert_eq!(cf.annual_noi(), 20_400.0);
        assert_eq!(cf.annual_debt_service(), 12_000.0);
        let result = cf.evaluate();
        assert_eq!(result.ratio, cf.dscr());
        assert_eq!(result.tier, DscrTier::Comfortable);
    }
}
