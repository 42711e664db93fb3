//! File-based deal loaders
//!
//! Single deals come from JSON, batches of deals from CSV in data/

use super::DealInputs;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

/// Default path to the sample deal batch
pub const DEFAULT_DEALS_PATH: &str = "data/deals.csv";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One row of a deal batch file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealRecord {
    pub deal_id: String,
    pub starting_revenue_m: f64,
    pub ebitda_margin_pct: f64,
    pub entry_multiple: f64,
    pub net_debt_entry_m: f64,
    pub transaction_fees_entry_pct: f64,
    pub years: u32,
    pub growth_rate_pct: f64,
    pub margin_improvement_pct: f64,
    pub exit_multiple: f64,
    pub net_debt_exit_m: f64,
    pub transaction_fees_exit_pct: f64,
}

impl DealRecord {
    pub fn inputs(&self) -> DealInputs {
        DealInputs {
            starting_revenue_m: self.starting_revenue_m,
            ebitda_margin_pct: self.ebitda_margin_pct,
            entry_multiple: self.entry_multiple,
            net_debt_entry_m: self.net_debt_entry_m,
            transaction_fees_entry_pct: self.transaction_fees_entry_pct,
            years: self.years,
            growth_rate_pct: self.growth_rate_pct,
            margin_improvement_pct: self.margin_improvement_pct,
            exit_multiple: self.exit_multiple,
            net_debt_exit_m: self.net_debt_exit_m,
            transaction_fees_exit_pct: self.transaction_fees_exit_pct,
        }
    }
}

/// Load a single deal from a JSON file. Omitted fields take their defaults.
pub fn load_deal_inputs(path: &Path) -> Result<DealInputs, LoadError> {
    let file = File::open(path)?;
    let inputs = serde_json::from_reader(BufReader::new(file))?;
    Ok(inputs)
}

/// Load every deal in a CSV batch file.
///
/// Rows are not validated here; each deal is validated when it is converted
/// to assumptions so one bad row does not reject the whole batch.
pub fn load_deal_batch(path: &Path) -> Result<Vec<DealRecord>, LoadError> {
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut deals = Vec::new();
    for result in reader.deserialize() {
        let record: DealRecord = result?;
        deals.push(record);
    }

    Ok(deals)
}
