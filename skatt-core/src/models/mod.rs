mod tax_bracket;
mod tax_constants;
mod tax_input;
mod tax_result;

pub use tax_bracket::TaxBracket;
pub use tax_constants::TaxConstants;
pub use tax_input::TaxInput;
pub use tax_result::{DeductionSummary, MonthlyBreakdown, TaxBreakdown, TaxResult};
