//! Identifier and degenerate-column removal
//!
//! Runs on the joined table before any encoding: pure ID columns carry no
//! signal for the classifier, and a column whose values are all distinct is
//! an identifier in disguise no matter what it is called.

use anyhow::Result;
use polars::prelude::*;

use super::target::TARGET_COLUMN;

/// Key and identifier columns dropped after the joins. Dropped only when
/// present; the extracts do not all carry every one of these.
pub const ID_COLUMNS: [&str; 8] = [
    "order_id",
    "delivery_order_id",
    "payment_order_id",
    "driver_id",
    "store_id",
    "hub_id",
    "payment_id",
    "channel_id",
];

/// Identifier columns actually present in the frame.
pub fn id_columns_present(df: &DataFrame) -> Vec<String> {
    ID_COLUMNS
        .iter()
        .filter(|name| df.column(name).is_ok())
        .map(|name| name.to_string())
        .collect()
}

/// Columns whose distinct count equals the row count (disguised row
/// identifiers). Columns containing nulls cannot be degenerate, and the
/// order-status column is exempt: the label is derived from it later, no
/// matter how small the table is.
pub fn degenerate_columns(df: &DataFrame) -> Result<Vec<String>> {
    let height = df.height();
    let mut degenerate = Vec::new();

    for column in df.get_columns() {
        if column.name().as_str() == TARGET_COLUMN {
            continue;
        }
        let series = column.as_materialized_series();
        if series.null_count() > 0 {
            continue;
        }
        if series.n_unique()? == height {
            degenerate.push(column.name().to_string());
        }
    }

    Ok(degenerate)
}
