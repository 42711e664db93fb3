//! Annualized (compound) rates for IRR and CAGR

use crate::error::ProjectionError;

/// Annualize a start-to-end ratio over `years`, as a percentage.
///
/// Returns `(ratio^(1/years) - 1) * 100`. A negative ratio has no real root
/// for `years > 1`; for a single year the exponent is 1 and the rate is just
/// `ratio - 1`. A non-finite ratio (zero starting value) is undefined too.
pub fn compound_annual_rate(
    ratio: f64,
    years: u32,
    metric: &'static str,
) -> Result<f64, ProjectionError> {
    if years == 0 {
        return Err(ProjectionError::InvalidHorizon { years });
    }

    if !ratio.is_finite() || (ratio < 0.0 && years > 1) {
        return Err(ProjectionError::UndefinedGrowthRate { metric, base: ratio });
    }

    let annualized = if years == 1 {
        ratio
    } else {
        ratio.powf(1.0 / years as f64)
    };

    Ok((annualized - 1.0) * 100.0)
}
