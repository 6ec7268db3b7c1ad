//! Table loading for the seven Delivery Center extracts
//!
//! The extracts are CSV files with inconsistent encodings (the hub and store
//! files ship as Latin-1, the rest as UTF-8) and inconsistent delimiters, so
//! each file is decoded with a UTF-8 first / Latin-1 fallback and the
//! delimiter is sniffed from the header line before handing the buffer to
//! polars.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;

use super::error::PipelineError;

/// Logical names of the seven input tables. `orders` is the fact table; the
/// rest are dimensions joined onto it.
pub const TABLE_NAMES: [&str; 7] = [
    "orders",
    "stores",
    "hubs",
    "deliveries",
    "channels",
    "payments",
    "drivers",
];

/// The loaded tables, keyed by logical name, plus any per-table load failures.
///
/// A table that fails to load does not stop the remaining tables from
/// loading; it only becomes fatal when a join step asks for it.
#[derive(Debug, Default)]
pub struct TableSet {
    frames: BTreeMap<String, DataFrame>,
    failures: Vec<(String, String)>,
}

impl TableSet {
    /// Insert a loaded table under its logical name.
    pub fn insert(&mut self, name: &str, df: DataFrame) {
        self.frames.insert(name.to_string(), df);
    }

    /// Record a load failure for a table.
    pub fn record_failure(&mut self, name: &str, message: String) {
        self.failures.push((name.to_string(), message));
    }

    /// Get a table, failing with `MissingTable` if it never loaded.
    pub fn require(&self, name: &str) -> Result<&DataFrame, PipelineError> {
        self.frames.get(name).ok_or_else(|| PipelineError::MissingTable {
            name: name.to_string(),
        })
    }

    /// Tables that loaded successfully, in name order.
    pub fn loaded(&self) -> impl Iterator<Item = (&str, &DataFrame)> {
        self.frames.iter().map(|(name, df)| (name.as_str(), df))
    }

    /// Load failures recorded so far: (table name, error message).
    pub fn failures(&self) -> &[(String, String)] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Decode raw file bytes as UTF-8, falling back to Latin-1.
///
/// Latin-1 maps every byte to a code point, so the fallback cannot fail;
/// a garbled file surfaces later as a CSV parse error for that table.
fn decode_bytes(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => encoding_rs::mem::decode_latin1(bytes),
    }
}

/// Sniff the field delimiter by comparing counts in the header line.
///
/// Ties (including headers with neither character) fall back to a comma.
fn detect_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or("");
    let commas = header.matches(',').count();
    let semicolons = header.matches(';').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

/// Read a single CSV extract: decode, sniff the delimiter, parse.
pub fn read_table(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let text = decode_bytes(&bytes);
    let separator = detect_delimiter(&text);

    // 0 means full-table scan, mirroring the CLI convention.
    let infer = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(infer)
        .with_parse_options(CsvParseOptions::default().with_separator(separator))
        .into_reader_with_file_handle(Cursor::new(text.into_owned().into_bytes()))
        .finish()
        .with_context(|| format!("Failed to parse CSV file: {}", path.display()))?;

    Ok(df)
}

/// Load all seven tables from `<dir>/<name>.csv`.
///
/// Individual failures are recorded on the returned `TableSet` rather than
/// aborting the whole load; the join step decides which tables are fatal.
pub fn load_tables(dir: &Path, infer_schema_length: usize) -> TableSet {
    let mut tables = TableSet::default();

    for name in TABLE_NAMES {
        let path = dir.join(format!("{}.csv", name));
        match read_table(&path, infer_schema_length) {
            Ok(df) => tables.insert(name, df),
            Err(err) => tables.record_failure(name, format!("{:#}", err)),
        }
    }

    tables
}
