//! Correlation-based feature pruning
//!
//! Computes the absolute Pearson correlation matrix over the (by now fully
//! numeric) feature table once, then walks columns left to right and drops
//! any column that correlates above the threshold with an earlier column.
//! A column already scheduled for removal still counts against later
//! columns: the decision is made against the single matrix, never
//! recomputed after a drop. Changing that rule would change which features
//! survive, so it is preserved as-is.

use anyhow::Result;
use faer::Mat;
use polars::prelude::*;
use rayon::prelude::*;

/// Correlation matrix for the numeric columns of a frame, in column order.
pub struct CorrelationMatrix {
    pub matrix: Mat<f64>,
    pub columns: Vec<String>,
}

impl CorrelationMatrix {
    /// Absolute correlation between two columns by index.
    pub fn abs_at(&self, i: usize, j: usize) -> f64 {
        self.matrix[(i, j)].abs()
    }
}

/// Compute the Pearson correlation matrix via standardisation:
/// `R = Z^T * Z` with `Z = (X - mean) / (std * sqrt(n))`.
///
/// Constant and all-null columns have no defined correlation and are left
/// out of the result. Returns `None` when fewer than two usable columns
/// remain, which callers treat as "nothing to prune".
pub fn compute_correlation_matrix(df: &DataFrame) -> Result<Option<CorrelationMatrix>> {
    let numeric_cols: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric())
        .map(|col| col.name().to_string())
        .collect();

    if numeric_cols.len() < 2 {
        return Ok(None);
    }

    let float_columns: Vec<(String, Column)> = numeric_cols
        .iter()
        .filter_map(|name| {
            df.column(name)
                .ok()
                .and_then(|col| col.cast(&DataType::Float64).ok())
                .map(|col| (name.clone(), col))
        })
        .collect();

    let n_rows = df.height();
    if n_rows == 0 {
        return Ok(None);
    }

    // Standardise each column in parallel; a None marks a column with no
    // defined correlation (constant or all null).
    let standardized: Vec<Option<Vec<f64>>> = float_columns
        .par_iter()
        .map(|(_, col)| standardize(col, n_rows))
        .collect();

    let valid: Vec<(usize, Vec<f64>)> = standardized
        .into_iter()
        .enumerate()
        .filter_map(|(i, opt)| opt.map(|v| (i, v)))
        .collect();

    if valid.len() < 2 {
        return Ok(None);
    }

    let columns: Vec<String> = valid
        .iter()
        .map(|(i, _)| float_columns[*i].0.clone())
        .collect();

    let mut z = Mat::<f64>::zeros(n_rows, valid.len());
    for (col_idx, (_, col_data)) in valid.iter().enumerate() {
        for (row_idx, &val) in col_data.iter().enumerate() {
            z[(row_idx, col_idx)] = val;
        }
    }

    let matrix = z.transpose() * &z;

    Ok(Some(CorrelationMatrix { matrix, columns }))
}

/// Standardise one column to zero mean and `1/sqrt(n)` scaling so that
/// `Z^T * Z` yields correlations directly. Nulls contribute zero.
fn standardize(col: &Column, n_rows: usize) -> Option<Vec<f64>> {
    let ca = col.f64().ok()?;

    let mut sum = 0.0;
    let mut count = 0usize;
    for val in ca.iter().flatten() {
        sum += val;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    let mean = sum / count as f64;

    let mut sq_dev = 0.0;
    for val in ca.iter().flatten() {
        let dev = val - mean;
        sq_dev += dev * dev;
    }
    let std = (sq_dev / count as f64).sqrt();
    if std == 0.0 {
        return None;
    }

    let scale = 1.0 / (count as f64).sqrt();
    let standardized: Vec<f64> = ca
        .iter()
        .map(|val| match val {
            Some(x) => scale * (x - mean) / std,
            None => 0.0,
        })
        .collect();

    debug_assert_eq!(standardized.len(), n_rows);
    Some(standardized)
}

/// Select columns to drop from the upper triangle of the matrix.
///
/// Column `j` is dropped when any earlier column `i < j` correlates with it
/// above the threshold, unless `j` is the label column. NaN entries never
/// exceed the threshold.
pub fn select_columns_to_drop(
    corr: &CorrelationMatrix,
    threshold: f64,
    label_column: &str,
) -> Vec<String> {
    let n = corr.columns.len();
    let mut to_drop = Vec::new();

    for j in 0..n {
        if corr.columns[j] == label_column {
            continue;
        }
        let exceeds = (0..j).any(|i| {
            let r = corr.abs_at(i, j);
            !r.is_nan() && r > threshold
        });
        if exceeds {
            to_drop.push(corr.columns[j].clone());
        }
    }

    to_drop
}

/// One-shot helper: compute the matrix and return the columns to prune.
/// Fewer than two numeric columns is a no-op, not an error.
pub fn find_correlated_drops(
    df: &DataFrame,
    threshold: f64,
    label_column: &str,
) -> Result<Vec<String>> {
    match compute_correlation_matrix(df)? {
        Some(corr) => Ok(select_columns_to_drop(&corr, threshold, label_column)),
        None => Ok(Vec::new()),
    }
}
