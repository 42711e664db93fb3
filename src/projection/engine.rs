//! Core projection engine for deal returns

use crate::assumptions::Assumptions;
use crate::error::ProjectionError;
use super::metrics::{EntryExitMetrics, ProjectionResult, ReturnMetrics};
use super::rates::compound_annual_rate;
use super::series::ProjectionSeries;
use log::debug;

/// Projection engine for a single set of assumptions.
///
/// Holds no state beyond its inputs; every call recomputes from scratch.
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: Assumptions,
}

impl ProjectionEngine {
    pub fn new(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Project revenue, margin and EBITDA only.
    ///
    /// This is the revenue-only path: it needs no valuation inputs and never
    /// fails on zero equity.
    pub fn project_series(&self) -> Result<ProjectionSeries, ProjectionError> {
        let a = &self.assumptions;
        if a.years < 1 {
            return Err(ProjectionError::InvalidHorizon { years: a.years });
        }

        Ok(ProjectionSeries::compound(
            a.starting_revenue,
            a.annual_growth_rate,
            a.entry_ebitda_margin,
            a.annual_margin_improvement,
            a.years,
        ))
    }

    /// Run the full projection: series, entry/exit valuation and returns
    pub fn project(&self) -> Result<ProjectionResult, ProjectionError> {
        let a = &self.assumptions;
        let series = self.project_series()?;

        let entry = EntryExitMetrics::at(
            series.entry(),
            a.entry_ev_ebitda_multiple,
            a.net_debt_entry,
            a.transaction_fees_entry,
        );
        let exit = EntryExitMetrics::at(
            series.exit(),
            a.exit_ev_ebitda_multiple,
            a.net_debt_exit,
            a.transaction_fees_exit,
        );

        let returns = self.return_metrics(&entry, &exit)?;

        debug!(
            "projected {} years: entry EV {:.0}, exit EV {:.0}, multiple {:.3}x, IRR {:.2}%",
            a.years, entry.enterprise_value, exit.enterprise_value, returns.return_multiple, returns.irr
        );

        Ok(ProjectionResult { series, entry, exit, returns })
    }

    /// Entry fees are reported on the entry metrics but are not taken out of
    /// the entry equity used as the denominator here.
    fn return_metrics(
        &self,
        entry: &EntryExitMetrics,
        exit: &EntryExitMetrics,
    ) -> Result<ReturnMetrics, ProjectionError> {
        let years = self.assumptions.years;

        if entry.equity == 0.0 {
            return Err(ProjectionError::UndefinedReturn { entry_equity: entry.equity });
        }

        let final_equity = exit.equity - exit.transaction_fees;
        let return_multiple = final_equity / entry.equity;

        let irr = compound_annual_rate(return_multiple, years, "irr")?;
        let revenue_cagr = compound_annual_rate(exit.revenue / entry.revenue, years, "revenue_cagr")?;
        let ebitda_cagr = compound_annual_rate(exit.ebitda / entry.ebitda, years, "ebitda_cagr")?;

        Ok(ReturnMetrics {
            return_multiple,
            irr,
            revenue_cagr,
            ebitda_cagr,
            revenue_growth_abs: exit.revenue - entry.revenue,
            ebitda_growth_abs: exit.ebitda - entry.ebitda,
        })
    }
}

/// Project a deal. Shorthand for `ProjectionEngine::new(*assumptions).project()`.
pub fn project(assumptions: &Assumptions) -> Result<ProjectionResult, ProjectionError> {
    ProjectionEngine::new(*assumptions).project()
}
