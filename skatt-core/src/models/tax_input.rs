use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Caller-supplied input for a tax calculation. All amounts are annual SEK.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxInput {
    /// Gross annual income. Must be non-negative.
    pub gross_income: Decimal,

    /// Municipality name. Absent or unrecognized names fall back to the
    /// average municipal rate.
    #[serde(default)]
    pub municipality: Option<String>,

    /// Reserved for age-based allowance variants; currently unused.
    #[serde(default)]
    pub age: Option<u32>,

    #[serde(default)]
    pub has_deductions: bool,

    /// Annual deduction amount. Only applied when `has_deductions` is true,
    /// in which case it must be non-negative.
    #[serde(default)]
    pub deduction_amount: Decimal,
}
