//! Valuation bridge and return metrics derived from a projection

use super::series::{ProjectionPoint, ProjectionSeries};
use serde::Serialize;

/// Valuation snapshot at entry (year 0) or exit (final year)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntryExitMetrics {
    pub revenue: f64,
    pub ebitda: f64,
    pub ebitda_margin: f64,
    pub enterprise_value: f64,
    pub ev_to_revenue: f64,
    pub ev_to_ebitda: f64,
    pub net_debt: f64,
    /// Enterprise value less net debt
    pub equity: f64,
    /// Charged on enterprise value, not equity
    pub transaction_fees: f64,
}

impl EntryExitMetrics {
    pub(crate) fn at(point: &ProjectionPoint, ev_ebitda_multiple: f64, net_debt: f64, fee_rate: f64) -> Self {
        let enterprise_value = point.ebitda() * ev_ebitda_multiple;
        let ev_to_revenue = if point.revenue() == 0.0 {
            0.0
        } else {
            enterprise_value / point.revenue()
        };

        Self {
            revenue: point.revenue(),
            ebitda: point.ebitda(),
            ebitda_margin: point.ebitda_margin(),
            enterprise_value,
            ev_to_revenue,
            ev_to_ebitda: ev_ebitda_multiple,
            net_debt,
            equity: enterprise_value - net_debt,
            transaction_fees: enterprise_value * fee_rate,
        }
    }
}

/// Investment returns over the horizon.
///
/// `irr`, `revenue_cagr` and `ebitda_cagr` are percentages (14.1 = 14.1%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReturnMetrics {
    /// Exit equity net of exit fees over entry equity
    pub return_multiple: f64,
    pub irr: f64,
    pub revenue_cagr: f64,
    pub ebitda_cagr: f64,
    pub revenue_growth_abs: f64,
    pub ebitda_growth_abs: f64,
}

/// Complete output of one projection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionResult {
    pub series: ProjectionSeries,
    pub entry: EntryExitMetrics,
    pub exit: EntryExitMetrics,
    pub returns: ReturnMetrics,
}

impl ProjectionResult {
    /// Exit equity after exit fees; the numerator of the return multiple
    pub fn final_equity(&self) -> f64 {
        self.exit.equity - self.exit.transaction_fees
    }

    pub fn years(&self) -> u32 {
        self.series.horizon()
    }
}
