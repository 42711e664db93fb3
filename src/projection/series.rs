//! Year-indexed revenue, EBITDA and margin series

use serde::Serialize;

/// A single projected year.
///
/// EBITDA is derived from revenue and margin when the point is built and
/// cannot be set independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionPoint {
    year: u32,
    revenue: f64,
    ebitda: f64,
    ebitda_margin: f64,
}

impl ProjectionPoint {
    pub fn new(year: u32, revenue: f64, ebitda_margin: f64) -> Self {
        Self {
            year,
            revenue,
            ebitda: revenue * ebitda_margin,
            ebitda_margin,
        }
    }

    pub fn year(&self) -> u32 {
        self.year
    }

    pub fn revenue(&self) -> f64 {
        self.revenue
    }

    pub fn ebitda(&self) -> f64 {
        self.ebitda
    }

    /// Margin as a fraction of revenue
    pub fn ebitda_margin(&self) -> f64 {
        self.ebitda_margin
    }
}

/// Ordered projection from year 0 through the exit year, inclusive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionSeries {
    points: Vec<ProjectionPoint>,
}

impl ProjectionSeries {
    /// Compound revenue and margin forward from year 0.
    ///
    /// `horizon` must be at least 1; the engine checks this before building.
    pub(crate) fn compound(
        starting_revenue: f64,
        growth_rate: f64,
        entry_margin: f64,
        margin_improvement: f64,
        horizon: u32,
    ) -> Self {
        let points = (0..=horizon)
            .map(|year| {
                let t = year as i32;
                let revenue = starting_revenue * (1.0 + growth_rate).powi(t);
                let margin = entry_margin * (1.0 + margin_improvement).powi(t);
                ProjectionPoint::new(year, revenue, margin)
            })
            .collect();

        Self { points }
    }

    pub fn points(&self) -> &[ProjectionPoint] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProjectionPoint> {
        self.points.iter()
    }

    /// Number of points (horizon + 1)
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Horizon in years (index of the exit point)
    pub fn horizon(&self) -> u32 {
        self.exit().year
    }

    /// Year 0
    pub fn entry(&self) -> &ProjectionPoint {
        &self.points[0]
    }

    /// Final year
    pub fn exit(&self) -> &ProjectionPoint {
        &self.points[self.points.len() - 1]
    }

    pub fn get(&self, year: u32) -> Option<&ProjectionPoint> {
        self.points.get(year as usize)
    }

    /// Starting vs final revenue
    pub fn revenue_summary(&self) -> RevenueSummary {
        let starting_revenue = self.entry().revenue;
        let final_revenue = self.exit().revenue;

        RevenueSummary {
            starting_revenue,
            final_revenue,
            total_growth_pct: (final_revenue - starting_revenue) / starting_revenue * 100.0,
        }
    }
}

/// Headline numbers of a revenue-only projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevenueSummary {
    pub starting_revenue: f64,
    pub final_revenue: f64,
    /// Cumulative growth over the horizon, in percent
    pub total_growth_pct: f64,
}
