//! Swedish personal income tax computation core.
//!
//! This crate computes an individual's Swedish income tax for a given gross
//! annual income, municipality, and optional deductions, producing a
//! structured breakdown (municipal tax, state tax, net income, effective
//! rate) on both annual and monthly bases. A reverse solver infers the gross
//! income required to reach a target net income.
//!
//! The engine is a pure, stateless function of its inputs: no persistence,
//! no I/O, no shared mutable state. A [`RateTable`] is constructed once and
//! may be shared freely across threads.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use skatt_core::{GrossFromNetSolver, RateTable, TaxCalculator, TaxInput};
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
//! assert_eq!(result.breakdown.total_tax, dec!(145148));
//! assert_eq!(result.breakdown.net_income, dec!(354852));
//!
//! // And back again: which gross income yields a net of 354 852?
//! let solver = GrossFromNetSolver::new(&rates);
//! let gross = solver.gross_from_net(dec!(354852), Some("Stockholm"));
//! assert!((gross - dec!(500000)).abs() < dec!(200));
//! ```

pub mod calculations;
pub mod models;
pub mod rates;

pub use calculations::{GrossFromNetOutcome, GrossFromNetSolver, TaxCalculator, TaxInputError};
pub use models::*;
pub use rates::{AllowanceSchedule, RateTable};
