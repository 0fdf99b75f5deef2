use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Global tax constants for the supported tax year (2024).
///
/// `pension_contribution_rate` is carried for completeness but does not
/// enter the tax computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxConstants {
    pub basic_allowance: Decimal,
    pub state_tax_threshold: Decimal,
    pub state_tax_rate: Decimal,
    pub average_municipal_rate: Decimal,
    pub pension_contribution_rate: Decimal,
}
