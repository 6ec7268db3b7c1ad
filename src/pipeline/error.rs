//! Error types for the preprocessing pipeline.
//!
//! Each variant captures a specific failure mode: a table that never loaded,
//! a declared join key that is absent, a median that cannot be computed, or
//! a label category that was never observed. All of them abort the run
//! before any output is written.

use thiserror::Error;

/// Errors that can occur while building the training table.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A table required by a join step was not loaded.
    #[error("table '{name}' is not available (it failed to load or is missing from the data directory)")]
    MissingTable { name: String },

    /// A declared join key column is absent from one side of a join.
    #[error("join key '{column}' not found in table '{table}'")]
    MissingJoinKey { column: String, table: String },

    /// A numeric column has no non-missing values, so its median is undefined.
    #[error("cannot impute column '{column}': every value is missing, median is undefined")]
    UndefinedMedian { column: String },

    /// The order-status column (or the category the label is derived from)
    /// was not observed in the data.
    #[error("cannot derive the label: {reason}")]
    MissingLabelCategory { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_table_display() {
        let err = PipelineError::MissingTable {
            name: "payments".to_string(),
        };
        assert!(err.to_string().contains("'payments'"));
    }

    #[test]
    fn test_missing_join_key_display() {
        let err = PipelineError::MissingJoinKey {
            column: "store_id".to_string(),
            table: "stores".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "join key 'store_id' not found in table 'stores'"
        );
    }

    #[test]
    fn test_undefined_median_display() {
        let err = PipelineError::UndefinedMedian {
            column: "delivery_distance_meters".to_string(),
        };
        assert!(err.to_string().contains("median is undefined"));
    }
}
