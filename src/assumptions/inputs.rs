//! Display-unit deal inputs (millions, percent) and their validation
//!
//! This is the input-collection layer: ranges are checked here so the
//! engine only has to guard arithmetic edge cases.

use super::Assumptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One million currency units
pub const MILLION: f64 = 1_000_000.0;

/// Longest accepted projection horizon
pub const MAX_YEARS: u32 = 50;

/// Input range violations
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InputError {
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("years must be between 1 and {max}, got {years}")]
    InvalidYears { years: u32, max: u32 },
}

/// Deal inputs as a user enters them.
///
/// Money in millions, margins/rates/fees in percent, multiples as plain
/// numbers. Missing fields in JSON fall back to [`DealInputs::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DealInputs {
    pub starting_revenue_m: f64,
    pub ebitda_margin_pct: f64,
    pub entry_multiple: f64,
    pub net_debt_entry_m: f64,
    pub transaction_fees_entry_pct: f64,
    pub years: u32,
    pub growth_rate_pct: f64,
    pub margin_improvement_pct: f64,
    pub exit_multiple: f64,
    pub net_debt_exit_m: f64,
    pub transaction_fees_exit_pct: f64,
}

impl Default for DealInputs {
    fn default() -> Self {
        Self {
            starting_revenue_m: 10.0,
            ebitda_margin_pct: 20.0,
            entry_multiple: 10.0,
            net_debt_entry_m: 0.0,
            transaction_fees_entry_pct: 2.0,
            years: 5,
            growth_rate_pct: 10.0,
            margin_improvement_pct: 0.0,
            exit_multiple: 12.0,
            net_debt_exit_m: 0.0,
            transaction_fees_exit_pct: 2.0,
        }
    }
}

impl DealInputs {
    /// Check every field against its accepted range
    pub fn validate(&self) -> Result<(), InputError> {
        positive("starting_revenue_m", self.starting_revenue_m)?;
        in_range("ebitda_margin_pct", self.ebitda_margin_pct, 0.0, 100.0)?;
        non_negative("entry_multiple", self.entry_multiple)?;
        non_negative("net_debt_entry_m", self.net_debt_entry_m)?;
        in_range("transaction_fees_entry_pct", self.transaction_fees_entry_pct, 0.0, 100.0)?;

        if self.years < 1 || self.years > MAX_YEARS {
            return Err(InputError::InvalidYears { years: self.years, max: MAX_YEARS });
        }

        // Growth may exceed 100% but revenue cannot fall below zero
        finite("growth_rate_pct", self.growth_rate_pct)?;
        if self.growth_rate_pct < -100.0 {
            return Err(InputError::OutOfRange {
                field: "growth_rate_pct",
                value: self.growth_rate_pct,
                min: -100.0,
                max: f64::INFINITY,
            });
        }
        finite("margin_improvement_pct", self.margin_improvement_pct)?;

        non_negative("exit_multiple", self.exit_multiple)?;
        non_negative("net_debt_exit_m", self.net_debt_exit_m)?;
        in_range("transaction_fees_exit_pct", self.transaction_fees_exit_pct, 0.0, 100.0)?;
        Ok(())
    }

    /// Validate, then convert to engine units (base currency, fractions)
    pub fn to_assumptions(&self) -> Result<Assumptions, InputError> {
        self.validate()?;

        Ok(Assumptions {
            starting_revenue: self.starting_revenue_m * MILLION,
            entry_ebitda_margin: self.ebitda_margin_pct / 100.0,
            entry_ev_ebitda_multiple: self.entry_multiple,
            net_debt_entry: self.net_debt_entry_m * MILLION,
            transaction_fees_entry: self.transaction_fees_entry_pct / 100.0,
            years: self.years,
            annual_growth_rate: self.growth_rate_pct / 100.0,
            annual_margin_improvement: self.margin_improvement_pct / 100.0,
            exit_ev_ebitda_multiple: self.exit_multiple,
            net_debt_exit: self.net_debt_exit_m * MILLION,
            transaction_fees_exit: self.transaction_fees_exit_pct / 100.0,
        })
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InputError::NotFinite { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), InputError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(InputError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), InputError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(InputError::Negative { field, value })
    }
}

fn in_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), InputError> {
    finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(InputError::OutOfRange { field, value, min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_convert_to_default_deal() {
        let assumptions = DealInputs::default().to_assumptions().unwrap();
        assert_eq!(assumptions, Assumptions::default_deal());
    }

    #[test]
    fn test_unit_conversion() {
        let inputs = DealInputs {
            starting_revenue_m: 2.5,
            ebitda_margin_pct: 15.0,
            net_debt_entry_m: 1.0,
            growth_rate_pct: -20.0,
            margin_improvement_pct: 3.0,
            net_debt_exit_m: 0.5,
            transaction_fees_exit_pct: 1.5,
            ..Default::default()
        };
        let a = inputs.to_assumptions().unwrap();

        assert_relative_eq!(a.starting_revenue, 2_500_000.0);
        assert_relative_eq!(a.entry_ebitda_margin, 0.15);
        assert_relative_eq!(a.net_debt_entry, 1_000_000.0);
        assert_relative_eq!(a.annual_growth_rate, -0.20);
        assert_relative_eq!(a.annual_margin_improvement, 0.03);
        assert_relative_eq!(a.net_debt_exit, 500_000.0);
        assert_relative_eq!(a.transaction_fees_exit, 0.015);
        assert_eq!(a.years, 5);
    }

    #[test]
    fn test_rejects_non_positive_revenue() {
        let inputs = DealInputs { starting_revenue_m: 0.0, ..Default::default() };
        assert_eq!(
            inputs.to_assumptions(),
            Err(InputError::NotPositive { field: "starting_revenue_m", value: 0.0 })
        );
    }

    #[test]
    fn test_rejects_out_of_range_fields() {
        let margin = DealInputs { ebitda_margin_pct: 120.0, ..Default::default() };
        assert!(matches!(
            margin.validate(),
            Err(InputError::OutOfRange { field: "ebitda_margin_pct", .. })
        ));

        let multiple = DealInputs { exit_multiple: -1.0, ..Default::default() };
        assert!(matches!(
            multiple.validate(),
            Err(InputError::Negative { field: "exit_multiple", .. })
        ));

        let growth = DealInputs { growth_rate_pct: -150.0, ..Default::default() };
        assert!(matches!(
            growth.validate(),
            Err(InputError::OutOfRange { field: "growth_rate_pct", .. })
        ));

        let nan = DealInputs { margin_improvement_pct: f64::NAN, ..Default::default() };
        assert!(matches!(
            nan.validate(),
            Err(InputError::NotFinite { field: "margin_improvement_pct", .. })
        ));
    }

    #[test]
    fn test_rejects_horizon_outside_bounds() {
        let zero = DealInputs { years: 0, ..Default::default() };
        assert_eq!(zero.validate(), Err(InputError::InvalidYears { years: 0, max: MAX_YEARS }));

        let long = DealInputs { years: MAX_YEARS + 1, ..Default::default() };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let inputs: DealInputs =
            serde_json::from_str(r#"{"starting_revenue_m": 50.0, "years": 7}"#).unwrap();
        assert_relative_eq!(inputs.starting_revenue_m, 50.0);
        assert_eq!(inputs.years, 7);
        assert_relative_eq!(inputs.exit_multiple, DealInputs::default().exit_multiple);
    }
}
