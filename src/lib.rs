//! Return Calculator - projection and return engine for leveraged deal analysis
//!
//! This library provides:
//! - Year-by-year revenue, EBITDA and margin projections
//! - Entry/exit valuation and equity bridge (net debt, transaction fees)
//! - Return metrics: multiple of money, IRR, revenue and EBITDA CAGR
//! - Sensitivity analysis over growth, margin and exit multiple
//! - Display-unit input handling and text/CSV rendering

pub mod assumptions;
pub mod error;
pub mod projection;
pub mod report;
pub mod scenario;
pub mod sensitivity;

// Re-export commonly used types
pub use assumptions::{Assumptions, DealInputs, InputError};
pub use error::ProjectionError;
pub use projection::{project, ProjectionEngine, ProjectionResult, ProjectionSeries};
pub use scenario::{DealAnalysis, ScenarioRunner};
pub use sensitivity::{sensitivity, SensitivityConfig, SensitivityMode, SensitivityRow};
