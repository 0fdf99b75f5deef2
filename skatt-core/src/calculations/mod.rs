//! Tax calculation modules.
//!
//! [`engine`] holds the forward computation (allowance, municipal tax,
//! state tax, breakdown assembly); [`solver`] inverts it to recover the
//! gross income that produces a desired net income.

pub mod common;
pub mod engine;
pub mod solver;

pub use engine::{TaxCalculator, TaxInputError};
pub use solver::{GrossFromNetOutcome, GrossFromNetSolver};
