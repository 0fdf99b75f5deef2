//! Static reference data for the 2024 tax year.
//!
//! A [`RateTable`] bundles the per-municipality flat rates, the state-tax
//! bracket tiers, the global constants, and the basic-allowance schedule.
//! It is constructed once, never mutated, and can be shared freely across
//! concurrent callers.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{TaxBracket, TaxConstants};

/// Parameters of the four-segment basic-allowance (grundavdrag) function.
///
/// The segments are, in order of increasing gross income:
///
/// 1. below `low_limit`: `min(income × low_factor, income)`
/// 2. below `mid_limit`: `mid_base + (income − low_limit) × mid_factor`
/// 3. below `phase_out_start`: the flat `flat_amount`
/// 4. at or above `phase_out_start`: `flat_amount` reduced by
///    `phase_out_factor` per krona of excess, floored at zero
///
/// The segments are continuous in intent; the small discontinuities at the
/// boundaries are accepted artifacts of the simplified model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceSchedule {
    pub low_limit: Decimal,
    pub low_factor: Decimal,
    pub mid_limit: Decimal,
    pub mid_base: Decimal,
    pub mid_factor: Decimal,
    pub flat_amount: Decimal,
    pub phase_out_start: Decimal,
    pub phase_out_factor: Decimal,
}

/// Immutable rate reference data for the supported tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateTable {
    municipal_rates: BTreeMap<String, Decimal>,
    state_brackets: Vec<TaxBracket>,
    constants: TaxConstants,
    allowance: AllowanceSchedule,
}

impl RateTable {
    /// Builds the 2024 rate table: flat municipal rates for the major
    /// Swedish municipalities (plus the required `"Average"` entry), the
    /// two-tier state-tax bracket rule, and the global constants.
    pub fn new() -> Self {
        let constants = TaxConstants {
            basic_allowance: Decimal::from(14_000),
            state_tax_threshold: Decimal::from(598_500),
            state_tax_rate: Decimal::new(20, 2),
            average_municipal_rate: Decimal::new(32, 2),
            pension_contribution_rate: Decimal::new(7, 2),
        };

        let municipal_rates = [
            ("Stockholm", Decimal::new(3012, 4)),
            ("Göteborg", Decimal::new(3212, 4)),
            ("Malmö", Decimal::new(3244, 4)),
            ("Uppsala", Decimal::new(3212, 4)),
            ("Västerås", Decimal::new(3312, 4)),
            ("Örebro", Decimal::new(3312, 4)),
            ("Linköping", Decimal::new(3212, 4)),
            ("Helsingborg", Decimal::new(3144, 4)),
            ("Jönköping", Decimal::new(3312, 4)),
            ("Norrköping", Decimal::new(3312, 4)),
            ("Lund", Decimal::new(3144, 4)),
            ("Umeå", Decimal::new(3312, 4)),
            ("Gävle", Decimal::new(3412, 4)),
            ("Borås", Decimal::new(3212, 4)),
            ("Eskilstuna", Decimal::new(3312, 4)),
            ("Average", constants.average_municipal_rate),
        ]
        .into_iter()
        .map(|(name, rate)| (name.to_string(), rate))
        .collect();

        let state_brackets = vec![
            TaxBracket {
                min_income: Decimal::ZERO,
                max_income: Some(constants.state_tax_threshold),
                tax_rate: Decimal::ZERO,
                name: "No state tax".to_string(),
            },
            TaxBracket {
                min_income: constants.state_tax_threshold,
                max_income: None,
                tax_rate: constants.state_tax_rate,
                name: "State tax".to_string(),
            },
        ];

        let allowance = AllowanceSchedule {
            low_limit: Decimal::from(44_000),
            low_factor: Decimal::new(293, 3),
            mid_limit: Decimal::from(150_000),
            mid_base: constants.basic_allowance,
            mid_factor: Decimal::new(387, 4),
            flat_amount: Decimal::from(18_102),
            phase_out_start: constants.state_tax_threshold,
            phase_out_factor: Decimal::new(10, 2),
        };

        Self {
            municipal_rates,
            state_brackets,
            constants,
            allowance,
        }
    }

    /// Returns the flat municipal rate for a municipality.
    ///
    /// An absent or unrecognized municipality returns the average rate.
    /// This is a deliberate fallback policy, not a validation gap: callers
    /// always get a usable rate, never an error.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use skatt_core::RateTable;
    ///
    /// let rates = RateTable::new();
    ///
    /// assert_eq!(rates.rate_for(Some("Stockholm")), dec!(0.3012));
    /// assert_eq!(rates.rate_for(Some("Atlantis")), dec!(0.32));
    /// assert_eq!(rates.rate_for(None), dec!(0.32));
    /// ```
    pub fn rate_for(
        &self,
        municipality: Option<&str>,
    ) -> Decimal {
        let Some(name) = municipality else {
            return self.constants.average_municipal_rate;
        };

        match self.municipal_rates.get(name) {
            Some(rate) => *rate,
            None => {
                warn!(
                    municipality = %name,
                    "unknown municipality; falling back to average rate"
                );
                self.constants.average_municipal_rate
            }
        }
    }

    /// Returns the available municipality names in sorted order.
    pub fn municipalities(&self) -> Vec<&str> {
        self.municipal_rates.keys().map(String::as_str).collect()
    }

    /// Returns a snapshot copy of the global constants. Handing out a copy
    /// keeps the canonical table immutable.
    pub fn constants(&self) -> TaxConstants {
        self.constants.clone()
    }

    /// Returns the state-tax bracket tiers, ordered by `min_income`.
    pub fn state_brackets(&self) -> &[TaxBracket] {
        &self.state_brackets
    }

    /// Returns the basic-allowance schedule.
    pub fn allowance_schedule(&self) -> &AllowanceSchedule {
        &self.allowance
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::new()
    }
}
