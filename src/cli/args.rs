//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// Despacho - prepare the Delivery Center order tables for cancellation modelling
#[derive(Parser, Debug)]
#[command(name = "despacho")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing the seven CSV extracts
    /// (orders, stores, hubs, deliveries, channels, payments, drivers).
    #[arg(short, long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Output file path for the balanced training table.
    #[arg(short, long, default_value = "dados_para_treino.csv")]
    pub output: PathBuf,

    /// Correlation threshold - drop a feature when its absolute correlation
    /// with an earlier feature exceeds this value.
    #[arg(long, default_value = "0.95", value_parser = validate_correlation_threshold)]
    pub correlation_threshold: f64,

    /// Seed for the minority-class oversampler.
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Sentinel category substituted for missing string values.
    #[arg(long, default_value = "UNKNOWN")]
    pub sentinel: String,

    /// Optional path to export the fitted label-encoder mappings as JSON.
    #[arg(long)]
    pub mappings_out: Option<PathBuf>,

    /// Number of rows to use for CSV schema inference.
    /// Use 0 for a full table scan (slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

/// Validator for the correlation threshold parameter
fn validate_correlation_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(0.0..=1.0).contains(&value) {
        Err(format!(
            "correlation threshold must be between 0.0 and 1.0, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}
