//! Projection engine: yearly revenue/EBITDA series, valuation bridge and returns

mod engine;
mod metrics;
mod rates;
mod series;

pub use engine::{project, ProjectionEngine};
pub use metrics::{EntryExitMetrics, ProjectionResult, ReturnMetrics};
pub use rates::compound_annual_rate;
pub use series::{ProjectionPoint, ProjectionSeries, RevenueSummary};
