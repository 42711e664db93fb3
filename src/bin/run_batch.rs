//! Analyze every deal in a CSV batch file
//!
//! Outputs one summary row per deal; deals that fail validation or
//! projection are reported with their error and do not stop the batch.

use anyhow::{Context, Result};
use clap::Parser;
use return_calculator::assumptions::{load_deal_batch, loader::DEFAULT_DEALS_PATH};
use return_calculator::{Assumptions, DealAnalysis, InputError, ProjectionError, ScenarioRunner};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "run_batch", about = "Analyze a batch of deals from CSV")]
struct Args {
    /// Deal batch CSV
    #[arg(default_value = DEFAULT_DEALS_PATH)]
    input: PathBuf,

    /// Summary CSV to write
    #[arg(long, default_value = "batch_returns.csv")]
    output: PathBuf,
}

/// Summary of one deal in the batch output
#[derive(Debug, Serialize, Default)]
struct BatchRow {
    deal_id: String,
    return_multiple: Option<f64>,
    irr: Option<f64>,
    revenue_cagr: Option<f64>,
    ebitda_cagr: Option<f64>,
    /// Lowest and highest sensitivity IRR; empty when undefined
    downside_irr: Option<f64>,
    upside_irr: Option<f64>,
    error: Option<String>,
}

impl BatchRow {
    fn from_analysis(deal_id: String, analysis: &DealAnalysis) -> Self {
        let returns = &analysis.projection.returns;
        Self {
            deal_id,
            return_multiple: Some(returns.return_multiple),
            irr: Some(returns.irr),
            revenue_cagr: Some(returns.revenue_cagr),
            ebitda_cagr: Some(returns.ebitda_cagr),
            downside_irr: analysis.sensitivity.first().and_then(|row| row.irr),
            upside_irr: analysis.sensitivity.last().and_then(|row| row.irr),
            error: None,
        }
    }

    fn failed(deal_id: String, error: String) -> Self {
        Self { deal_id, error: Some(error), ..Default::default() }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    println!("Loading deals from {}...", args.input.display());

    let records = load_deal_batch(&args.input)
        .with_context(|| format!("failed to load deals from {}", args.input.display()))?;
    println!("Loaded {} deals in {:?}", records.len(), start.elapsed());

    let converted: Vec<(String, Result<Assumptions, InputError>)> = records
        .into_iter()
        .map(|record| {
            let assumptions = record.inputs().to_assumptions();
            (record.deal_id, assumptions)
        })
        .collect();

    let valid: Vec<Assumptions> = converted
        .iter()
        .filter_map(|(_, assumptions)| assumptions.as_ref().ok().copied())
        .collect();

    let runner = ScenarioRunner::new();
    let run_start = Instant::now();
    let mut analyses = runner.run_batch(&valid).into_iter();
    println!("Analyses complete in {:?}", run_start.elapsed());

    let mut rows = Vec::with_capacity(converted.len());
    for (deal_id, assumptions) in converted {
        let row = match assumptions {
            Err(err) => BatchRow::failed(deal_id, format!("invalid inputs: {}", err)),
            Ok(_) => match analyses.next() {
                Some(Ok(analysis)) => BatchRow::from_analysis(deal_id, &analysis),
                Some(Err(err)) => BatchRow::failed(deal_id, describe(&err)),
                None => BatchRow::failed(deal_id, "no result".to_string()),
            },
        };
        rows.push(row);
    }

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    println!("Output written to {}", args.output.display());

    println!("\nBatch Summary:");
    for row in &rows {
        match (&row.error, row.return_multiple, row.irr) {
            (Some(err), _, _) => println!("  {:<16} FAILED: {}", row.deal_id, err),
            (None, Some(multiple), Some(irr)) => {
                println!("  {:<16} {:>6.2}x  IRR {:>6.1}%", row.deal_id, multiple, irr)
            }
            _ => println!("  {:<16} incomplete", row.deal_id),
        }
    }

    let failed = rows.iter().filter(|row| row.error.is_some()).count();
    println!("\n{} of {} deals analyzed, total time: {:?}", rows.len() - failed, rows.len(), start.elapsed());

    Ok(())
}

fn describe(err: &ProjectionError) -> String {
    match err {
        ProjectionError::UndefinedReturn { .. } => {
            format!("{} (net debt wipes out entry equity)", err)
        }
        _ => err.to_string(),
    }
}
