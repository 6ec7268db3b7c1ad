//! Sequential left joins of the dimension tables onto orders
//!
//! The join order matters: `hub_id` only exists after stores has been joined
//! in, so the sequence below is part of the contract, not an optimisation.
//! Duplicate keys on the right-hand side multiply rows; that is accepted
//! behaviour inherited from the source extracts, not an error.

use anyhow::Result;
use polars::prelude::*;

use super::error::PipelineError;
use super::loader::TableSet;

/// Dimension tables in join order, each with the key column shared by both
/// sides. Unmatched order rows are preserved with nulls on the right.
pub const JOIN_SEQUENCE: [(&str, &str); 6] = [
    ("stores", "store_id"),
    ("hubs", "hub_id"),
    ("deliveries", "delivery_order_id"),
    ("channels", "channel_id"),
    ("payments", "payment_order_id"),
    ("drivers", "driver_id"),
];

/// Left-join the six dimension tables onto orders, in sequence.
///
/// Fails with `MissingTable` if a required table never loaded and with
/// `MissingJoinKey` if a key column is absent from either side. Same-named
/// non-key columns on the right are suffixed `_right` by polars.
pub fn join_tables(tables: &TableSet) -> Result<DataFrame> {
    let mut acc = tables.require("orders")?.clone();

    for (table, key) in JOIN_SEQUENCE {
        let right = tables.require(table)?;
        ensure_key(&acc, key, "orders")?;
        ensure_key(right, key, table)?;
        acc = left_join(acc, right, key)?;
    }

    Ok(acc)
}

fn ensure_key(df: &DataFrame, key: &str, table: &str) -> Result<(), PipelineError> {
    if df.column(key).is_ok() {
        Ok(())
    } else {
        Err(PipelineError::MissingJoinKey {
            column: key.to_string(),
            table: table.to_string(),
        })
    }
}

/// Left join keeping every accumulator row.
pub fn left_join(left: DataFrame, right: &DataFrame, key: &str) -> PolarsResult<DataFrame> {
    left.lazy()
        .join(
            right.clone().lazy(),
            [col(key)],
            [col(key)],
            JoinArgs::new(JoinType::Left),
        )
        .collect()
}
