use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One tier of a progressive tax rule. Each tier taxes only the slice of
/// income between `min_income` and `max_income`; a `max_income` of `None`
/// marks the unbounded top tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
    pub name: String,
}
