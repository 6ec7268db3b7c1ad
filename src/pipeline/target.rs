//! Binary target derivation
//!
//! After label encoding, the order-status column holds integer codes. The
//! target builder looks up which code the encoder assigned to the canceled
//! category and rewrites the column to 1 = canceled, 0 = delivered.

use anyhow::Result;
use polars::prelude::*;

use super::encode::EncoderMap;
use super::error::PipelineError;

/// Column the label is derived from.
pub const TARGET_COLUMN: &str = "order_status";

/// Category that maps to 1.
pub const CANCELED_CATEGORY: &str = "CANCELED";

/// Rewrite the encoded order-status column into a 0/1 label.
///
/// Fails with `MissingLabelCategory` when the column was never encoded or
/// the canceled category was not observed in the data.
pub fn build_target(df: &DataFrame, encoders: &EncoderMap) -> Result<DataFrame> {
    let mapping =
        encoders
            .get(TARGET_COLUMN)
            .ok_or_else(|| PipelineError::MissingLabelCategory {
                reason: format!("column '{}' is absent from the encoded data", TARGET_COLUMN),
            })?;

    let canceled_code =
        mapping
            .code(CANCELED_CATEGORY)
            .ok_or_else(|| PipelineError::MissingLabelCategory {
                reason: format!(
                    "category '{}' was never observed in '{}'",
                    CANCELED_CATEGORY, TARGET_COLUMN
                ),
            })?;

    let ca = df.column(TARGET_COLUMN)?.u32()?;
    let label: Vec<i32> = ca
        .into_iter()
        .map(|v| i32::from(v == Some(canceled_code)))
        .collect();

    let mut out = df.clone();
    out.replace(TARGET_COLUMN, Series::new(TARGET_COLUMN.into(), label))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::encode::label_encode;

    #[test]
    fn test_build_target_marks_canceled_as_one() {
        let df = df! {
            "order_status" => ["DELIVERED", "CANCELED", "DELIVERED", "CANCELED"],
        }
        .unwrap();

        let (encoded, encoders) = label_encode(&df).unwrap();
        let out = build_target(&encoded, &encoders).unwrap();

        let label: Vec<i32> = out
            .column("order_status")
            .unwrap()
            .i32()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(label, vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_build_target_without_canceled_category_fails() {
        let df = df! {
            "order_status" => ["DELIVERED", "FINISHED"],
        }
        .unwrap();

        let (encoded, encoders) = label_encode(&df).unwrap();
        let err = build_target(&encoded, &encoders).unwrap_err();
        assert!(err.to_string().contains("CANCELED"));
    }

    #[test]
    fn test_build_target_without_status_column_fails() {
        let df = df! {
            "store_segment" => ["FOOD", "GOOD"],
        }
        .unwrap();

        let (encoded, encoders) = label_encode(&df).unwrap();
        let err = build_target(&encoded, &encoders).unwrap_err();
        assert!(err.to_string().contains("order_status"));
    }
}
