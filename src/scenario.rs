//! Deal analysis runner: projection plus sensitivity, singly or in batches
//!
//! Each deal is an independent pure computation, so batches fan out across
//! deals with rayon.

use crate::assumptions::Assumptions;
use crate::error::ProjectionError;
use crate::projection::{ProjectionEngine, ProjectionResult};
use crate::sensitivity::{SensitivityAnalyzer, SensitivityConfig, SensitivityInputs, SensitivityRow};
use log::info;
use rayon::prelude::*;
use serde::Serialize;

/// Projection of one deal together with its sensitivity table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealAnalysis {
    pub projection: ProjectionResult,
    pub sensitivity: Vec<SensitivityRow>,
}

/// Runs full deal analyses with a fixed sensitivity configuration
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let analysis = runner.analyze(&Assumptions::default_deal())?;
/// println!("IRR {:.1}%", analysis.projection.returns.irr);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    analyzer: SensitivityAnalyzer,
}

impl ScenarioRunner {
    /// Runner with paired low/base/high sensitivity
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sensitivity(config: SensitivityConfig) -> Self {
        Self {
            analyzer: SensitivityAnalyzer::new(config),
        }
    }

    pub fn sensitivity_config(&self) -> &SensitivityConfig {
        self.analyzer.config()
    }

    /// Project the deal, then run sensitivity against its entry equity
    pub fn analyze(&self, assumptions: &Assumptions) -> Result<DealAnalysis, ProjectionError> {
        let projection = ProjectionEngine::new(*assumptions).project()?;
        let inputs = SensitivityInputs::from_assumptions(assumptions, projection.entry.equity);
        let sensitivity = self.analyzer.analyze(&inputs)?;

        Ok(DealAnalysis { projection, sensitivity })
    }

    /// Analyze many deals in parallel. Results keep the input order; a
    /// failing deal does not affect the others.
    pub fn run_batch(&self, deals: &[Assumptions]) -> Vec<Result<DealAnalysis, ProjectionError>> {
        info!("analyzing {} deals", deals.len());
        deals.par_iter().map(|deal| self.analyze(deal)).collect()
    }
}
