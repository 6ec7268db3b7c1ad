//! Despacho: Delivery-order preprocessing CLI
//!
//! Loads the seven Delivery Center extracts, joins them into one wide
//! per-order table, cleans and encodes it, derives the canceled/delivered
//! label, balances the classes and writes the training table.

mod cli;
mod pipeline;
mod report;
mod utils;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use polars::prelude::*;

use cli::Cli;
use pipeline::{
    build_target, degenerate_columns, export_mappings, find_correlated_drops, id_columns_present,
    impute_missing, join_tables, label_encode, load_tables, one_hot_encode, oversample_minority,
    TARGET_COLUMN,
};
use report::PipelineSummary;
use utils::{
    create_spinner, finish_with_success, print_banner, print_completion, print_config,
    print_count, print_info, print_step_header, print_step_time, print_success, print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&cli.data_dir, &cli.output, cli.correlation_threshold, cli.seed);

    let mut summary = PipelineSummary::new();

    // Step 1: Load the seven extracts
    print_step_header(1, "Load Tables");

    let step_start = Instant::now();
    let spinner = create_spinner("Reading CSV extracts...");
    let tables = load_tables(&cli.data_dir, cli.infer_schema_length);
    finish_with_success(&spinner, "Tables loaded");

    for (name, df) in tables.loaded() {
        print_info(&format!("{}: {} rows, {} columns", name, df.height(), df.width()));
    }
    for (name, message) in tables.failures() {
        print_warning(&format!("{} failed to load: {}", name, message));
    }
    summary.tables_loaded = tables.len();
    summary.load_failures = tables.failures().to_vec();
    summary.orders_rows = tables.require("orders").map(|df| df.height()).unwrap_or(0);
    print_step_time(step_start.elapsed());

    // Step 2: Left-join the dimensions onto orders
    print_step_header(2, "Join Tables");

    let step_start = Instant::now();
    let spinner = create_spinner("Joining dimension tables onto orders...");
    let mut df = join_tables(&tables)?;
    finish_with_success(&spinner, "Joins complete");
    summary.joined_rows = df.height();
    print_info(&format!("Joined table: {} rows, {} columns", df.height(), df.width()));
    print_step_time(step_start.elapsed());

    // Step 3: Identifier and degenerate-column removal
    print_step_header(3, "Drop Identifier Columns");

    let step_start = Instant::now();
    let id_drops = id_columns_present(&df);
    df = df.drop_many(&id_drops);
    print_count("identifier column(s)", id_drops.len(), None);
    summary.add_id_drops(id_drops);

    let degenerate_drops = degenerate_columns(&df)?;
    if degenerate_drops.is_empty() {
        print_info("No all-distinct columns found");
    } else {
        df = df.drop_many(&degenerate_drops);
        print_count("all-distinct column(s)", degenerate_drops.len(), None);
    }
    summary.add_degenerate_drops(degenerate_drops);
    print_success("Identifier columns dropped");
    print_step_time(step_start.elapsed());

    // Step 4: Null imputation
    print_step_header(4, "Impute Missing Values");

    let step_start = Instant::now();
    let spinner = create_spinner("Filling numeric medians and sentinel categories...");
    df = impute_missing(&df, &cli.sentinel)?;
    finish_with_success(&spinner, "Missing values imputed");
    print_step_time(step_start.elapsed());

    // Step 5: Categorical encoding
    print_step_header(5, "Encode Categorical Columns");

    let step_start = Instant::now();
    let names_before: std::collections::HashSet<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    df = one_hot_encode(&df)?;
    summary.one_hot_columns_added = df
        .get_column_names()
        .iter()
        .filter(|name| !names_before.contains(name.as_str()))
        .count();
    print_count("one-hot indicator column(s)", summary.one_hot_columns_added, None);

    let (encoded, encoders) = label_encode(&df)?;
    df = encoded;
    summary.label_encoded_columns = encoders.len();
    print_count("label-encoded column(s)", encoders.len(), None);

    if let Some(path) = &cli.mappings_out {
        export_mappings(&encoders, path)?;
        print_success(&format!("Mappings exported to {}", path.display()));
    }
    print_success("Encoding complete");
    print_step_time(step_start.elapsed());

    // Step 6: Binary target derivation
    print_step_header(6, "Derive Target");

    let step_start = Instant::now();
    df = build_target(&df, &encoders)?;
    let (delivered, canceled) = class_counts(&df)?;
    summary.class_counts_before = (delivered, canceled);
    print_info(&format!("{} delivered, {} canceled", delivered, canceled));
    print_success("Binary label derived (1 = canceled)");
    print_step_time(step_start.elapsed());

    // Step 7: Correlation pruning
    print_step_header(7, "Correlation Pruning");

    let step_start = Instant::now();
    let spinner = create_spinner("Computing correlation matrix...");
    let correlation_drops = find_correlated_drops(&df, cli.correlation_threshold, TARGET_COLUMN)?;
    finish_with_success(&spinner, "Correlation analysis complete");

    if correlation_drops.is_empty() {
        print_info("No columns above the correlation threshold");
    } else {
        print_count(
            "highly correlated column(s)",
            correlation_drops.len(),
            Some(&format!("(>{:.2})", cli.correlation_threshold)),
        );
        df = df.drop_many(&correlation_drops);
        print_success("Dropped highly correlated columns");
    }
    summary.add_correlation_drops(correlation_drops);
    print_step_time(step_start.elapsed());

    // Step 8: Class balancing
    print_step_header(8, "Balance Classes");

    let step_start = Instant::now();
    let spinner = create_spinner("Oversampling the minority class...");
    df = oversample_minority(&df, TARGET_COLUMN, cli.seed)?;
    finish_with_success(&spinner, "Classes balanced");
    print_info(&format!("Balanced table: {} rows", df.height()));
    print_step_time(step_start.elapsed());

    // Step 9: Save output
    print_step_header(9, "Save Training Table");

    let step_start = Instant::now();
    let spinner = create_spinner("Writing output file...");
    save_dataset(&mut df, &cli.output)?;
    finish_with_success(&spinner, &format!("Saved to {}", cli.output.display()));
    print_step_time(step_start.elapsed());

    summary.final_rows = df.height();
    summary.final_columns = df.width();
    summary.display();

    print_completion();

    Ok(())
}

/// Count (delivered, canceled) rows in the binary label column.
fn class_counts(df: &DataFrame) -> Result<(usize, usize)> {
    let ca = df.column(TARGET_COLUMN)?.i32()?;
    let canceled = ca.into_iter().filter(|v| *v == Some(1)).count();
    let delivered = ca.into_iter().filter(|v| *v == Some(0)).count();
    Ok((delivered, canceled))
}

/// Write the training table as comma-delimited UTF-8 CSV with a header row.
fn save_dataset(df: &mut DataFrame, path: &std::path::Path) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    CsvWriter::new(&mut file)
        .finish(df)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
    Ok(())
}
