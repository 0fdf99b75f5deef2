use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Annual tax breakdown. Monetary fields are whole SEK; the effective rate
/// is a 0–100 percentage with two decimal digits.
///
/// `municipal_tax` and `state_tax` are rounded independently before being
/// summed and re-rounded into `total_tax`, so the component sum may differ
/// from an independently rounded total by ±1 SEK at rounding boundaries.
/// This is an accepted tolerance of the model, not a defect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub municipal_tax: Decimal,
    pub state_tax: Decimal,
    pub total_tax: Decimal,
    /// Net income reconciled against gross income, not taxable income.
    pub net_income: Decimal,
    pub effective_tax_rate: Decimal,
}

/// Monthly figures, each derived from the unrounded annual value divided by
/// twelve and rounded independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBreakdown {
    pub gross_monthly: Decimal,
    pub tax_monthly: Decimal,
    pub net_monthly: Decimal,
}

/// Deduction details, reported only when deductions were applied with a
/// positive amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionSummary {
    pub amount: Decimal,
    pub taxable_income: Decimal,
}

/// Complete output of a tax calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub gross_income: Decimal,
    pub breakdown: TaxBreakdown,
    pub monthly_breakdown: MonthlyBreakdown,
    pub deductions: Option<DeductionSummary>,
}
