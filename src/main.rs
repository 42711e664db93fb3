//! Return Calculator CLI
//!
//! Projects a single deal and prints entry/exit metrics, the yearly series
//! and the sensitivity table

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use return_calculator::assumptions::load_deal_inputs;
use return_calculator::report::{
    render_metrics, render_sensitivity, render_series, write_sensitivity_csv, write_series_csv,
};
use return_calculator::{DealAnalysis, DealInputs, ScenarioRunner, SensitivityConfig};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

/// Deal return calculator
///
/// Money is in millions, rates and fees in percent.
#[derive(Parser, Debug)]
#[command(name = "return_calculator", version, about)]
struct Cli {
    /// JSON file with deal inputs; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting revenue ($M)
    #[arg(long)]
    revenue: Option<f64>,

    /// Entry EBITDA margin (%)
    #[arg(long)]
    margin: Option<f64>,

    /// Entry EV/EBITDA multiple
    #[arg(long)]
    entry_multiple: Option<f64>,

    /// Net debt at entry ($M)
    #[arg(long)]
    net_debt_entry: Option<f64>,

    /// Entry transaction fees (% of EV)
    #[arg(long)]
    fees_entry: Option<f64>,

    /// Projection horizon (years)
    #[arg(long)]
    years: Option<u32>,

    /// Annual revenue growth (%)
    #[arg(long, allow_hyphen_values = true)]
    growth: Option<f64>,

    /// Annual margin improvement (% of current margin)
    #[arg(long, allow_hyphen_values = true)]
    margin_improvement: Option<f64>,

    /// Exit EV/EBITDA multiple
    #[arg(long)]
    exit_multiple: Option<f64>,

    /// Net debt at exit ($M)
    #[arg(long)]
    net_debt_exit: Option<f64>,

    /// Exit transaction fees (% of EV)
    #[arg(long)]
    fees_exit: Option<f64>,

    /// Evaluate every growth/margin/multiple combination instead of low/base/high
    #[arg(long)]
    full_grid: bool,

    /// Print the analysis as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Write the yearly series to this CSV file
    #[arg(long)]
    series_csv: Option<PathBuf>,

    /// Write the sensitivity table to this CSV file
    #[arg(long)]
    sensitivity_csv: Option<PathBuf>,
}

impl Cli {
    fn deal_inputs(&self) -> Result<DealInputs> {
        let mut inputs = match &self.config {
            Some(path) => load_deal_inputs(path)
                .with_context(|| format!("failed to load deal inputs from {}", path.display()))?,
            None => DealInputs::default(),
        };

        let overrides = [
            (self.revenue, &mut inputs.starting_revenue_m),
            (self.margin, &mut inputs.ebitda_margin_pct),
            (self.entry_multiple, &mut inputs.entry_multiple),
            (self.net_debt_entry, &mut inputs.net_debt_entry_m),
            (self.fees_entry, &mut inputs.transaction_fees_entry_pct),
            (self.growth, &mut inputs.growth_rate_pct),
            (self.margin_improvement, &mut inputs.margin_improvement_pct),
            (self.exit_multiple, &mut inputs.exit_multiple),
            (self.net_debt_exit, &mut inputs.net_debt_exit_m),
            (self.fees_exit, &mut inputs.transaction_fees_exit_pct),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                *field = value;
            }
        }
        if let Some(years) = self.years {
            inputs.years = years;
        }

        Ok(inputs)
    }
}

#[derive(Serialize)]
struct AnalysisReport<'a> {
    generated_at: DateTime<Utc>,
    inputs: &'a DealInputs,
    analysis: &'a DealAnalysis,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let inputs = cli.deal_inputs()?;
    let assumptions = inputs
        .to_assumptions()
        .context("invalid deal inputs, please check your input values and try again")?;

    let runner = if cli.full_grid {
        ScenarioRunner::with_sensitivity(SensitivityConfig::full_grid())
    } else {
        ScenarioRunner::new()
    };
    let analysis = runner
        .analyze(&assumptions)
        .context("projection failed, please check your input values and try again")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.json {
        let report = AnalysisReport {
            generated_at: Utc::now(),
            inputs: &inputs,
            analysis: &analysis,
        };
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        writeln!(out, "Return Calculator v{}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "========================\n")?;
        render_metrics(&mut out, &analysis.projection)?;
        writeln!(out, "Projection ({} years):", analysis.projection.years())?;
        render_series(&mut out, &analysis.projection.series)?;
        writeln!(out, "\nSensitivity:")?;
        render_sensitivity(&mut out, &analysis.sensitivity)?;
    }

    if let Some(path) = &cli.series_csv {
        let file = File::create(path).with_context(|| format!("unable to create {}", path.display()))?;
        write_series_csv(file, &analysis.projection.series)?;
        log::info!("series written to {}", path.display());
    }
    if let Some(path) = &cli.sensitivity_csv {
        let file = File::create(path).with_context(|| format!("unable to create {}", path.display()))?;
        write_sensitivity_csv(file, &analysis.sensitivity)?;
        log::info!("sensitivity written to {}", path.display());
    }

    Ok(())
}
