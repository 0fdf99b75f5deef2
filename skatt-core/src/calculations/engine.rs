//! Forward tax computation for Swedish personal income tax.
//!
//! The calculation proceeds in the following steps:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Reject negative gross income or negative deduction amount |
//! | 2    | Basic allowance (grundavdrag) from the piecewise schedule |
//! | 3    | Taxable income = gross − allowance − deductions, floored at 0 |
//! | 4    | Resolve the flat municipal rate from the rate table |
//! | 5    | Municipal tax and state tax on taxable income, each rounded |
//! | 6    | Net income and effective rate recomputed against gross income |
//! | 7    | Monthly breakdown, each figure divided by 12 and rounded |
//!
//! Tax amounts are computed on *taxable* income, but the reported net income
//! and effective rate are always reconciled back to *gross* income. The
//! breakdown is therefore built twice: a provisional record on the taxable
//! basis, then the final record copying the tax fields and recomputing the
//! net and rate fields against gross.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use skatt_core::{RateTable, TaxCalculator, TaxInput};
//!
//! let rates = RateTable::new();
//! let calculator = TaxCalculator::new(&rates);
//!
//! let input = TaxInput {
//!     gross_income: dec!(500000),
//!     municipality: Some("Stockholm".to_string()),
//!     ..TaxInput::default()
//! };
//!
//! let result = calculator.calculate(&input).unwrap();
//!
//! // Allowance 18 102, taxable 481 898, municipal 481 898 × 0.3012
//! assert_eq!(result.breakdown.municipal_tax, dec!(145148));
//! assert_eq!(result.breakdown.state_tax, dec!(0));
//! assert_eq!(result.breakdown.net_income, dec!(354852));
//! assert_eq!(result.breakdown.effective_tax_rate, dec!(29.03));
//! assert_eq!(result.monthly_breakdown.net_monthly, dec!(29571));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::{round_rate, round_sek};
use crate::models::{DeductionSummary, MonthlyBreakdown, TaxBreakdown, TaxInput, TaxResult};
use crate::rates::RateTable;

/// Validation failures for a tax calculation. Both are fatal to the single
/// call; every other input has a defined fallback and never errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxInputError {
    /// Gross income was negative.
    #[error("gross income cannot be negative, got {0}")]
    NegativeIncome(Decimal),

    /// Deductions were enabled with a negative deduction amount.
    #[error("deduction amount cannot be negative, got {0}")]
    NegativeDeduction(Decimal),
}

/// Calculator for the forward tax computation.
///
/// Borrows an immutable [`RateTable`]; each call is independent and
/// side-effect free, so a single calculator may serve concurrent callers.
#[derive(Debug, Clone)]
pub struct TaxCalculator<'a> {
    rates: &'a RateTable,
}

impl<'a> TaxCalculator<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    /// Computes the full annual and monthly tax breakdown for an input.
    ///
    /// # Errors
    ///
    /// Returns [`TaxInputError`] if the gross income is negative, or if
    /// deductions are enabled with a negative deduction amount.
    pub fn calculate(
        &self,
        input: &TaxInput,
    ) -> Result<TaxResult, TaxInputError> {
        if input.gross_income < Decimal::ZERO {
            return Err(TaxInputError::NegativeIncome(input.gross_income));
        }
        if input.has_deductions && input.deduction_amount < Decimal::ZERO {
            return Err(TaxInputError::NegativeDeduction(input.deduction_amount));
        }

        let taxable_income = self.taxable_income(
            input.gross_income,
            input.has_deductions,
            input.deduction_amount,
        );
        let municipal_rate = self.rates.rate_for(input.municipality.as_deref());

        let breakdown = self.breakdown_for(input.gross_income, taxable_income, municipal_rate);

        let months = Decimal::from(12);
        let annual_net = input.gross_income - breakdown.total_tax;
        let monthly_breakdown = MonthlyBreakdown {
            gross_monthly: round_sek(input.gross_income / months),
            tax_monthly: round_sek(breakdown.total_tax / months),
            net_monthly: round_sek(annual_net / months),
        };

        let deductions = (input.has_deductions && input.deduction_amount > Decimal::ZERO)
            .then(|| DeductionSummary {
                amount: round_sek(input.deduction_amount),
                taxable_income: round_sek(taxable_income),
            });

        Ok(TaxResult {
            gross_income: round_sek(input.gross_income),
            breakdown,
            monthly_breakdown,
            deductions,
        })
    }

    /// Computes the tax breakdown from monthly figures.
    ///
    /// Both the monthly income and the monthly deduction amount are scaled
    /// to annual values before delegating to [`calculate`](Self::calculate).
    ///
    /// # Errors
    ///
    /// Same validation failures as [`calculate`](Self::calculate).
    pub fn calculate_from_monthly(
        &self,
        monthly_income: Decimal,
        municipality: Option<&str>,
        has_deductions: bool,
        monthly_deduction: Decimal,
    ) -> Result<TaxResult, TaxInputError> {
        let months = Decimal::from(12);
        let input = TaxInput {
            gross_income: monthly_income * months,
            municipality: municipality.map(str::to_string),
            age: None,
            has_deductions,
            deduction_amount: monthly_deduction * months,
        };
        self.calculate(&input)
    }

    /// Computes the basic allowance (grundavdrag) for a gross annual income.
    ///
    /// Four-segment piecewise function: proportional for very low incomes
    /// (capped at the income itself), linear up to 150 000, flat 18 102 up
    /// to the state-tax threshold, then phased out at 10 öre per krona and
    /// floored at zero for very high earners.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use skatt_core::{RateTable, TaxCalculator};
    ///
    /// let rates = RateTable::new();
    /// let calculator = TaxCalculator::new(&rates);
    ///
    /// assert_eq!(calculator.basic_allowance(dec!(30000)), dec!(8790));
    /// assert_eq!(calculator.basic_allowance(dec!(500000)), dec!(18102));
    /// assert_eq!(calculator.basic_allowance(dec!(700000)), dec!(7952));
    /// ```
    pub fn basic_allowance(
        &self,
        gross_income: Decimal,
    ) -> Decimal {
        let schedule = self.rates.allowance_schedule();

        if gross_income <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        if gross_income < schedule.low_limit {
            (gross_income * schedule.low_factor).min(gross_income)
        } else if gross_income < schedule.mid_limit {
            schedule.mid_base + (gross_income - schedule.low_limit) * schedule.mid_factor
        } else if gross_income < schedule.phase_out_start {
            schedule.flat_amount
        } else {
            let reduction =
                (gross_income - schedule.phase_out_start) * schedule.phase_out_factor;
            (schedule.flat_amount - reduction).max(Decimal::ZERO)
        }
    }

    /// Computes taxable income: gross income minus the basic allowance and
    /// any applied deductions, floored at zero.
    pub fn taxable_income(
        &self,
        gross_income: Decimal,
        has_deductions: bool,
        deduction_amount: Decimal,
    ) -> Decimal {
        let deduction = if has_deductions {
            deduction_amount.max(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        (gross_income - self.basic_allowance(gross_income) - deduction).max(Decimal::ZERO)
    }

    /// Computes municipal tax (kommunalskatt): the flat rate applied to the
    /// whole taxable income. Unrounded.
    pub fn municipal_tax(
        &self,
        taxable_income: Decimal,
        municipal_rate: Decimal,
    ) -> Decimal {
        taxable_income.max(Decimal::ZERO) * municipal_rate
    }

    /// Computes state tax (statlig skatt) from the ordered bracket tiers.
    ///
    /// Each tier taxes only the slice of taxable income within its own
    /// bounds, so with the 2024 table this is 20% of the excess above
    /// 598 500 SEK and nothing below it. Unrounded.
    pub fn state_tax(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        let mut tax = Decimal::ZERO;
        for bracket in self.rates.state_brackets() {
            let upper = bracket.max_income.unwrap_or(Decimal::MAX);
            let slice = taxable_income.min(upper) - bracket.min_income;
            if slice > Decimal::ZERO {
                tax += slice * bracket.tax_rate;
            }
        }
        tax
    }

    /// Assembles the annual breakdown for a gross/taxable income pair.
    ///
    /// Built in two pure steps: a provisional breakdown on the taxable
    /// basis, then the final breakdown carrying the tax fields over and
    /// recomputing net income and effective rate against gross income.
    pub(crate) fn breakdown_for(
        &self,
        gross_income: Decimal,
        taxable_income: Decimal,
        municipal_rate: Decimal,
    ) -> TaxBreakdown {
        let municipal_tax = round_sek(self.municipal_tax(taxable_income, municipal_rate));
        let state_tax = round_sek(self.state_tax(taxable_income));
        let total_tax = round_sek(municipal_tax + state_tax);

        let provisional = TaxBreakdown {
            municipal_tax,
            state_tax,
            total_tax,
            net_income: round_sek(taxable_income - total_tax),
            effective_tax_rate: effective_rate(total_tax, taxable_income),
        };

        TaxBreakdown {
            net_income: round_sek(gross_income - provisional.total_tax),
            effective_tax_rate: effective_rate(provisional.total_tax, gross_income),
            ..provisional
        }
    }
}

/// Total tax as a percentage of a base income, two decimal digits.
/// Defined as zero when the base is zero.
fn effective_rate(
    total_tax: Decimal,
    base_income: Decimal,
) -> Decimal {
    if base_income > Decimal::ZERO {
        round_rate(total_tax / base_income * Decimal::ONE_HUNDRED)
    } else {
        Decimal::ZERO
    }
}
