//! Sensitivity analysis over growth, margin and exit multiple
//!
//! Each scenario is an exit-only recomputation: base revenue compounded at
//! the scenario growth rate, a flat scenario margin across the horizon, and
//! the scenario exit multiple. Margin improvement and entry fees do not
//! enter these rows.

use crate::assumptions::Assumptions;
use crate::error::ProjectionError;
use crate::projection::compound_annual_rate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Base values the scenarios are perturbed around
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityInputs {
    pub base_revenue: f64,
    /// Margin fraction held flat over the horizon
    pub base_margin: f64,
    pub base_growth: f64,
    pub base_exit_multiple: f64,
    pub net_debt_exit: f64,
    pub transaction_fees_exit: f64,
    /// Entry equity of the baseline projection
    pub entry_equity: f64,
    pub years: u32,
}

impl SensitivityInputs {
    /// Take the base values from a deal and the entry equity of its projection
    pub fn from_assumptions(assumptions: &Assumptions, entry_equity: f64) -> Self {
        Self {
            base_revenue: assumptions.starting_revenue,
            base_margin: assumptions.entry_ebitda_margin,
            base_growth: assumptions.annual_growth_rate,
            base_exit_multiple: assumptions.exit_ev_ebitda_multiple,
            net_debt_exit: assumptions.net_debt_exit,
            transaction_fees_exit: assumptions.transaction_fees_exit,
            entry_equity,
            years: assumptions.years,
        }
    }
}

/// How the three perturbation levels are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensitivityMode {
    /// Low/base/high scenarios: row i takes level i of every dimension (3 rows)
    #[default]
    Paired,
    /// Every combination of levels, growth-major (27 rows)
    FullGrid,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityConfig {
    /// Growth rate step (fraction)
    pub growth_step: f64,
    /// Margin step (fraction)
    pub margin_step: f64,
    /// Exit multiple step (turns of EBITDA)
    pub multiple_step: f64,
    pub mode: SensitivityMode,
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            growth_step: 0.05,
            margin_step: 0.02,
            multiple_step: 1.0,
            mode: SensitivityMode::Paired,
        }
    }
}

impl SensitivityConfig {
    pub fn full_grid() -> Self {
        Self { mode: SensitivityMode::FullGrid, ..Self::default() }
    }
}

/// Outcome of one scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityRow {
    pub revenue_growth: f64,
    pub ebitda_margin: f64,
    pub exit_multiple: f64,
    pub return_multiple: f64,
    /// Percent; `None` when the return multiple is negative over a multi-year horizon
    pub irr: Option<f64>,
}

impl SensitivityRow {
    pub fn irr_defined(&self) -> bool {
        self.irr.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SensitivityAnalyzer {
    config: SensitivityConfig,
}

impl SensitivityAnalyzer {
    pub fn new(config: SensitivityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SensitivityConfig {
        &self.config
    }

    /// Evaluate every scenario. Rows with an undefined IRR are kept.
    pub fn analyze(&self, inputs: &SensitivityInputs) -> Result<Vec<SensitivityRow>, ProjectionError> {
        if inputs.years < 1 {
            return Err(ProjectionError::InvalidHorizon { years: inputs.years });
        }
        if inputs.entry_equity == 0.0 {
            return Err(ProjectionError::UndefinedReturn { entry_equity: inputs.entry_equity });
        }

        let growth = levels(inputs.base_growth, self.config.growth_step);
        let margin = levels(inputs.base_margin, self.config.margin_step);
        let multiple = levels(inputs.base_exit_multiple, self.config.multiple_step);

        let rows: Vec<SensitivityRow> = match self.config.mode {
            SensitivityMode::Paired => (0..3)
                .map(|i| evaluate(inputs, growth[i], margin[i], multiple[i]))
                .collect(),
            SensitivityMode::FullGrid => {
                let mut rows = Vec::with_capacity(27);
                for &g in &growth {
                    for &m in &margin {
                        for &x in &multiple {
                            rows.push(evaluate(inputs, g, m, x));
                        }
                    }
                }
                rows
            }
        };

        debug!("sensitivity: {} scenarios over {} years", rows.len(), inputs.years);
        Ok(rows)
    }
}

/// Paired sensitivity with the default steps
pub fn sensitivity(inputs: &SensitivityInputs) -> Result<Vec<SensitivityRow>, ProjectionError> {
    SensitivityAnalyzer::default().analyze(inputs)
}

fn levels(base: f64, step: f64) -> [f64; 3] {
    [base - step, base, base + step]
}

fn evaluate(inputs: &SensitivityInputs, growth: f64, margin: f64, exit_multiple: f64) -> SensitivityRow {
    let exit_ebitda = inputs.base_revenue * (1.0 + growth).powi(inputs.years as i32) * margin;
    let exit_ev = exit_ebitda * exit_multiple;
    let exit_equity = exit_ev - inputs.net_debt_exit - exit_ev * inputs.transaction_fees_exit;
    let return_multiple = exit_equity / inputs.entry_equity;

    let irr = match compound_annual_rate(return_multiple, inputs.years, "irr") {
        Ok(irr) => Some(irr),
        Err(err) => {
            warn!(
                "scenario growth {:.4} margin {:.4} multiple {:.2}: {}",
                growth, margin, exit_multiple, err
            );
            None
        }
    };

    SensitivityRow {
        revenue_growth: growth,
        ebitda_margin: margin,
        exit_multiple,
        return_multiple,
        irr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_inputs() -> SensitivityInputs {
        SensitivityInputs {
            base_revenue: 1_000_000.0,
            base_margin: 0.20,
            base_growth: 0.10,
            base_exit_multiple: 12.0,
            net_debt_exit: 0.0,
            transaction_fees_exit: 0.02,
            entry_equity: 2_000_000.0,
            years: 5,
        }
    }

    fn expected_multiple(growth: f64, margin: f64, multiple: f64) -> f64 {
        let ev = 1_000_000.0 * (1.0 + growth).powi(5) * margin * multiple;
        (ev - ev * 0.02) / 2_000_000.0
    }

    #[test]
    fn test_paired_rows_take_matching_levels() {
        let rows = sensitivity(&reference_inputs()).unwrap();
        assert_eq!(rows.len(), 3);

        let expected = [(0.05, 0.18, 11.0), (0.10, 0.20, 12.0), (0.15, 0.22, 13.0)];
        for (row, &(g, m, x)) in rows.iter().zip(expected.iter()) {
            assert_relative_eq!(row.revenue_growth, g, epsilon = 1e-12);
            assert_relative_eq!(row.ebitda_margin, m, epsilon = 1e-12);
            assert_relative_eq!(row.exit_multiple, x, epsilon = 1e-12);
            assert_relative_eq!(row.return_multiple, expected_multiple(g, m, x), max_relative = 1e-9);

            let irr = row.irr.unwrap();
            assert_relative_eq!(irr, (row.return_multiple.powf(0.2) - 1.0) * 100.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_paired_rows_are_distinct_and_ordered() {
        let rows = sensitivity(&reference_inputs()).unwrap();
        assert!(rows[0].return_multiple < rows[1].return_multiple);
        assert!(rows[1].return_multiple < rows[2].return_multiple);
        assert!(rows[0].irr.unwrap() < rows[1].irr.unwrap());
        assert!(rows[1].irr.unwrap() < rows[2].irr.unwrap());

        assert_relative_eq!(rows[0].return_multiple, 1.238248, epsilon = 1e-5);
        assert_relative_eq!(rows[1].return_multiple, 1.893960, epsilon = 1e-5);
        assert_relative_eq!(rows[2].return_multiple, 2.818716, epsilon = 1e-5);
    }

    #[test]
    fn test_base_row_ignores_margin_improvement() {
        // The middle row is the flat-margin base case, whatever the deal's improvement
        let deal = Assumptions {
            starting_revenue: 1_000_000.0,
            entry_ebitda_margin: 0.20,
            annual_margin_improvement: 0.10,
            exit_ev_ebitda_multiple: 12.0,
            transaction_fees_exit: 0.02,
            ..Assumptions::default_deal()
        };
        let inputs = SensitivityInputs::from_assumptions(&deal, 2_000_000.0);
        let rows = sensitivity(&inputs).unwrap();
        assert_relative_eq!(rows[1].return_multiple, expected_multiple(0.10, 0.20, 12.0), max_relative = 1e-9);
    }

    #[test]
    fn test_full_grid_covers_every_combination() {
        let analyzer = SensitivityAnalyzer::new(SensitivityConfig::full_grid());
        let rows = analyzer.analyze(&reference_inputs()).unwrap();
        assert_eq!(rows.len(), 27);

        // growth-major, then margin, then multiple
        assert_relative_eq!(rows[0].revenue_growth, 0.05, epsilon = 1e-12);
        assert_relative_eq!(rows[0].ebitda_margin, 0.18, epsilon = 1e-12);
        assert_relative_eq!(rows[0].exit_multiple, 11.0);
        assert_relative_eq!(rows[1].exit_multiple, 12.0);
        assert_relative_eq!(rows[3].ebitda_margin, 0.20, epsilon = 1e-12);
        assert_relative_eq!(rows[9].revenue_growth, 0.10, epsilon = 1e-12);

        // Centre of the grid is the base case
        let paired = sensitivity(&reference_inputs()).unwrap();
        assert_eq!(rows[13], paired[1]);
        assert_eq!(rows[0], paired[0]);
        assert_eq!(rows[26], paired[2]);
    }

    #[test]
    fn test_negative_equity_row_is_kept_without_irr() {
        let inputs = SensitivityInputs { net_debt_exit: 3_000_000.0, ..reference_inputs() };
        let rows = sensitivity(&inputs).unwrap();

        assert_eq!(rows.len(), 3);
        assert!(rows[0].return_multiple < 0.0);
        assert!(!rows[0].irr_defined());
        assert!(rows[2].irr_defined());
    }

    #[test]
    fn test_zero_entry_equity_is_undefined_return() {
        let inputs = SensitivityInputs { entry_equity: 0.0, ..reference_inputs() };
        assert_eq!(
            sensitivity(&inputs),
            Err(ProjectionError::UndefinedReturn { entry_equity: 0.0 })
        );
    }

    #[test]
    fn test_zero_horizon_is_rejected() {
        let inputs = SensitivityInputs { years: 0, ..reference_inputs() };
        assert_eq!(sensitivity(&inputs), Err(ProjectionError::InvalidHorizon { years: 0 }));
    }

    #[test]
    fn test_custom_steps() {
        let config = SensitivityConfig { growth_step: 0.10, margin_step: 0.05, multiple_step: 2.0, ..Default::default() };
        let rows = SensitivityAnalyzer::new(config).analyze(&reference_inputs()).unwrap();
        assert_relative_eq!(rows[2].revenue_growth, 0.20, epsilon = 1e-12);
        assert_relative_eq!(rows[0].ebitda_margin, 0.15, epsilon = 1e-12);
        assert_relative_eq!(rows[0].exit_multiple, 10.0);
    }
}
