//! Null imputation
//!
//! Numeric columns are filled with the column median, string columns with a
//! sentinel category, so nothing is null and everything is encodable by the
//! time the encoder runs. Columns without nulls are returned untouched,
//! which keeps their dtype and makes the step idempotent.

use anyhow::Result;
use polars::prelude::*;

use super::error::PipelineError;

/// Sentinel category used for missing string values.
pub const SENTINEL: &str = "UNKNOWN";

/// Fill nulls in place of a frame: median for numeric columns, `sentinel`
/// for string columns.
///
/// A numeric column with no non-missing values has no median and fails with
/// `UndefinedMedian` instead of silently producing NaN.
pub fn impute_missing(df: &DataFrame, sentinel: &str) -> Result<DataFrame> {
    let mut out = df.clone();

    for column in df.get_columns() {
        let series = column.as_materialized_series();
        if series.null_count() == 0 {
            continue;
        }
        let name = column.name().clone();

        if column.dtype().is_primitive_numeric() {
            let median = series
                .median()
                .ok_or_else(|| PipelineError::UndefinedMedian {
                    column: name.to_string(),
                })?;

            // pandas-style: a numeric column holding nulls becomes float
            // once filled, because the median need not be integral.
            let ca = series.cast(&DataType::Float64)?;
            let filled: Vec<f64> = ca
                .f64()?
                .into_iter()
                .map(|v| v.unwrap_or(median))
                .collect();
            out.replace(name.as_str(), Series::new(name.clone(), filled))?;
        } else if matches!(column.dtype(), DataType::String) {
            let filled: Vec<String> = series
                .str()?
                .into_iter()
                .map(|v| v.unwrap_or(sentinel).to_string())
                .collect();
            out.replace(name.as_str(), Series::new(name.clone(), filled))?;
        }
    }

    Ok(out)
}
