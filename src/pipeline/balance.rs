//! Class balancing by random oversampling
//!
//! Minority-class rows are duplicated (with replacement, seeded) and
//! appended to the original frame until both classes reach the original
//! majority count. Rows are exact copies; nothing synthetic is generated.

use anyhow::Result;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Oversample the minority class of a 0/1 label column.
///
/// Already-balanced, single-class and empty frames pass through unchanged.
/// The same seed always duplicates the same rows.
pub fn oversample_minority(df: &DataFrame, target: &str, seed: u64) -> Result<DataFrame> {
    let ca = df.column(target)?.i32()?;

    let mut zeros: Vec<IdxSize> = Vec::new();
    let mut ones: Vec<IdxSize> = Vec::new();
    for (idx, value) in ca.into_iter().enumerate() {
        match value {
            Some(0) => zeros.push(idx as IdxSize),
            Some(1) => ones.push(idx as IdxSize),
            _ => {}
        }
    }

    if zeros.is_empty() || ones.is_empty() || zeros.len() == ones.len() {
        return Ok(df.clone());
    }

    let (minority, majority_count) = if zeros.len() < ones.len() {
        (&zeros, ones.len())
    } else {
        (&ones, zeros.len())
    };
    let deficit = majority_count - minority.len();

    let mut rng = StdRng::seed_from_u64(seed);
    let extra: Vec<IdxSize> = (0..deficit)
        .map(|_| minority[rng.gen_range(0..minority.len())])
        .collect();

    let duplicates = df.take(&IdxCa::from_vec("idx".into(), extra))?;
    Ok(df.vstack(&duplicates)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class_counts(df: &DataFrame, target: &str) -> (usize, usize) {
        let ca = df.column(target).unwrap().i32().unwrap();
        let ones = ca.into_iter().filter(|v| *v == Some(1)).count();
        let zeros = ca.into_iter().filter(|v| *v == Some(0)).count();
        (zeros, ones)
    }

    #[test]
    fn test_oversampling_equalizes_class_counts() {
        let df = df! {
            "order_status" => [0i32, 0, 0, 0, 0, 1, 1],
            "order_amount" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
        }
        .unwrap();

        let out = oversample_minority(&df, "order_status", 42).unwrap();
        let (zeros, ones) = class_counts(&out, "order_status");
        assert_eq!(zeros, 5);
        assert_eq!(ones, 5);
        assert_eq!(out.height(), 10); // 2 * original majority count
    }

    #[test]
    fn test_oversampled_rows_are_exact_copies() {
        let df = df! {
            "order_status" => [0i32, 0, 0, 1],
            "order_amount" => [1.0f64, 2.0, 3.0, 99.0],
        }
        .unwrap();

        let out = oversample_minority(&df, "order_status", 42).unwrap();

        // Every appended minority row must carry the single minority amount
        let amounts: Vec<f64> = out
            .column("order_amount")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(&amounts[..4], &[1.0, 2.0, 3.0, 99.0]);
        assert!(amounts[4..].iter().all(|v| *v == 99.0));
    }

    #[test]
    fn test_oversampling_is_deterministic_for_a_seed() {
        let df = df! {
            "order_status" => [0i32, 0, 0, 0, 0, 0, 1, 1],
            "order_amount" => [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
        }
        .unwrap();

        let a = oversample_minority(&df, "order_status", 7).unwrap();
        let b = oversample_minority(&df, "order_status", 7).unwrap();
        assert!(a.equals(&b));
    }

    #[test]
    fn test_balanced_frame_passes_through() {
        let df = df! {
            "order_status" => [0i32, 1, 0, 1],
            "order_amount" => [1.0f64, 2.0, 3.0, 4.0],
        }
        .unwrap();

        let out = oversample_minority(&df, "order_status", 42).unwrap();
        assert!(out.equals(&df));
    }

    #[test]
    fn test_single_class_frame_passes_through() {
        let df = df! {
            "order_status" => [1i32, 1, 1],
        }
        .unwrap();

        let out = oversample_minority(&df, "order_status", 42).unwrap();
        assert_eq!(out.height(), 3);
    }
}
