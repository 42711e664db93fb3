//! Error types for projection and sensitivity calculations

use thiserror::Error;

/// Arithmetic failures of the projection engine and sensitivity analyzer.
///
/// These are never caught inside the engine. A failed computation returns
/// one of these and no partial results.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProjectionError {
    /// Projection horizon shorter than one year.
    #[error("invalid projection horizon: {years} years (must be at least 1)")]
    InvalidHorizon { years: u32 },

    /// Entry equity is zero, so the return multiple divides by zero.
    #[error("return multiple undefined: entry equity is {entry_equity}")]
    UndefinedReturn { entry_equity: f64 },

    /// Annualizing a ratio that has no real root (negative base, or a zero
    /// starting value).
    #[error("{metric} undefined: cannot annualize ratio {base}")]
    UndefinedGrowthRate { metric: &'static str, base: f64 },
}
