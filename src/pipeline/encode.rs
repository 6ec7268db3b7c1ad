//! Categorical encoding: one-hot for the nominated low-cardinality columns,
//! dense integer codes for everything else
//!
//! The label encoders are returned as an explicit, immutable `EncoderMap`
//! and threaded to the target builder, which needs to know which code the
//! order-status column assigned to the canceled category.

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Low-cardinality nominal columns expanded into indicator columns.
/// Filtered to those actually present; the category set is whatever the
/// data contains at encoding time.
pub const ONE_HOT_COLUMNS: [&str; 9] = [
    "channel_type",
    "delivery_status",
    "driver_modal",
    "driver_type",
    "hub_city",
    "hub_state",
    "store_segment",
    "payment_method",
    "payment_status",
];

/// Immutable mapping from a column's distinct string values to dense codes.
///
/// Classes are kept sorted, so the code of a value is its rank among the
/// observed distinct values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelMapping {
    classes: Vec<String>,
}

impl LabelMapping {
    /// Learn a mapping from the observed values of a string column.
    fn fit(ca: &StringChunked) -> Self {
        let distinct: BTreeSet<&str> = ca.into_iter().flatten().collect();
        Self {
            classes: distinct.into_iter().map(str::to_string).collect(),
        }
    }

    /// The code assigned to a value, if it was observed during encoding.
    pub fn code(&self, value: &str) -> Option<u32> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(value))
            .ok()
            .map(|idx| idx as u32)
    }

    /// Observed classes in code order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

/// Per-column label encoders, keyed by column name.
pub type EncoderMap = BTreeMap<String, LabelMapping>;

/// Expand the allow-listed categorical columns into 0/1 indicator columns.
///
/// Each encoded source column is removed and replaced by one indicator per
/// observed category, named `{column}_{category}`, appended after the
/// remaining columns in sorted category order.
pub fn one_hot_encode(df: &DataFrame) -> Result<DataFrame> {
    let mut encoded_sources: Vec<String> = Vec::new();
    let mut indicators: Vec<Column> = Vec::new();

    for name in ONE_HOT_COLUMNS {
        let Ok(column) = df.column(name) else {
            continue;
        };
        if !matches!(column.dtype(), DataType::String) {
            continue;
        }

        let ca = column.str()?;
        let classes: BTreeSet<&str> = ca.into_iter().flatten().collect();

        for class in classes {
            let values: Vec<i32> = ca
                .into_iter()
                .map(|v| i32::from(v == Some(class)))
                .collect();
            let indicator_name = format!("{}_{}", name, class);
            indicators.push(Column::new(indicator_name.into(), values));
        }
        encoded_sources.push(name.to_string());
    }

    let mut out = df.drop_many(&encoded_sources);
    for indicator in indicators {
        out.with_column(indicator)?;
    }

    Ok(out)
}

/// Replace every remaining string column with dense integer codes and
/// return the fitted mappings.
///
/// Codes follow sorted distinct order, so e.g. "CANCELED" < "DELIVERED"
/// regardless of row order. Nulls (none survive imputation) stay null.
pub fn label_encode(df: &DataFrame) -> Result<(DataFrame, EncoderMap)> {
    let mut out = df.clone();
    let mut encoders = EncoderMap::new();

    for column in df.get_columns() {
        if !matches!(column.dtype(), DataType::String) {
            continue;
        }
        let name = column.name().clone();
        let ca = column.str()?;
        let mapping = LabelMapping::fit(ca);

        let codes: Vec<Option<u32>> = ca
            .into_iter()
            .map(|v| v.and_then(|s| mapping.code(s)))
            .collect();
        out.replace(name.as_str(), Series::new(name.clone(), codes))?;

        encoders.insert(name.to_string(), mapping);
    }

    Ok((out, encoders))
}

/// Write the fitted label-encoder mappings to a JSON file, so a later
/// inference run can recover which integer means which category.
pub fn export_mappings(encoders: &EncoderMap, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create mappings file: {}", path.display()))?;
    serde_json::to_writer_pretty(file, encoders)
        .with_context(|| format!("Failed to write mappings file: {}", path.display()))?;
    Ok(())
}
