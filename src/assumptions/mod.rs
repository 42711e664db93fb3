//! Deal assumptions: the engine's input record and the input layer that builds it

mod inputs;
pub mod loader;

pub use inputs::{DealInputs, InputError, MAX_YEARS, MILLION};
pub use loader::{load_deal_batch, load_deal_inputs, DealRecord, LoadError};

use serde::{Deserialize, Serialize};

/// Entry and exit assumptions for a single deal.
///
/// All money is in base currency units and all rates are fractions
/// (0.10 = 10%). Conversion from display units happens in [`DealInputs`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    /// Year 0 revenue
    pub starting_revenue: f64,

    /// EBITDA margin at year 0, as a fraction
    pub entry_ebitda_margin: f64,

    /// EV / EBITDA multiple paid at entry
    pub entry_ev_ebitda_multiple: f64,

    pub net_debt_entry: f64,

    /// Entry fees as a fraction of entry enterprise value
    pub transaction_fees_entry: f64,

    /// Projection horizon in years; the series holds `years + 1` points
    pub years: u32,

    /// Compound annual revenue growth
    pub annual_growth_rate: f64,

    /// Compound annual growth of the margin fraction itself (not percentage points)
    pub annual_margin_improvement: f64,

    /// EV / EBITDA multiple received at exit
    pub exit_ev_ebitda_multiple: f64,

    pub net_debt_exit: f64,

    /// Exit fees as a fraction of exit enterprise value
    pub transaction_fees_exit: f64,
}

impl Assumptions {
    /// Default deal used by the CLI when no inputs are given
    pub fn default_deal() -> Self {
        Self {
            starting_revenue: 10_000_000.0,
            entry_ebitda_margin: 0.20,
            entry_ev_ebitda_multiple: 10.0,
            net_debt_entry: 0.0,
            transaction_fees_entry: 0.02,
            years: 5,
            annual_growth_rate: 0.10,
            annual_margin_improvement: 0.0,
            exit_ev_ebitda_multiple: 12.0,
            net_debt_exit: 0.0,
            transaction_fees_exit: 0.02,
        }
    }

    /// Revenue-only projection: no margin, no valuation, no fees.
    ///
    /// Only [`ProjectionEngine::project_series`](crate::ProjectionEngine::project_series)
    /// is meaningful for these assumptions; full projection fails with zero entry equity.
    pub fn revenue_only(starting_revenue: f64, annual_growth_rate: f64, years: u32) -> Self {
        Self {
            starting_revenue,
            entry_ebitda_margin: 0.0,
            entry_ev_ebitda_multiple: 0.0,
            net_debt_entry: 0.0,
            transaction_fees_entry: 0.0,
            years,
            annual_growth_rate,
            annual_margin_improvement: 0.0,
            exit_ev_ebitda_multiple: 0.0,
            net_debt_exit: 0.0,
            transaction_fees_exit: 0.0,
        }
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::default_deal()
    }
}
