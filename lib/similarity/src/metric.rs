//! Record-level distance metrics
//!
//! A [`DistanceMetric`] turns two records of the same schema into a
//! non-negative dissimilarity. Clustering algorithms only ever see records
//! through this trait, so new metrics can be plugged in without touching
//! them.

use crate::distance::{edit_distance, squared_euclidean};
use clusterx_core::Record;

/// Dissimilarity between two records
///
/// Implementations must be pure: calling `measure` repeatedly with the same
/// inputs gives the same result and has no side effects. Both records are
/// expected to share a schema (same numeric and categorical counts).
pub trait DistanceMetric: Send + Sync {
    /// Human-readable name shown to users
    fn name(&self) -> &'static str;

    /// Distance between `a` and `b`, never negative
    fn measure(&self, a: &Record, b: &Record) -> f64;
}

/// Euclidean distance over mixed features
///
/// Numeric features contribute their squared difference. Categorical
/// features contribute the squared edit distance between the values at the
/// same position. The result is the square root of the total.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanDistance;

impl EuclideanDistance {
    pub fn new() -> Self {
        Self
    }
}

impl DistanceMetric for EuclideanDistance {
    fn name(&self) -> &'static str {
        "Euclidean Distance"
    }

    fn measure(&self, a: &Record, b: &Record) -> f64 {
        let numeric = squared_euclidean(a.numeric(), b.numeric());

        let categorical: f64 = a
            .categorical()
            .iter()
            .zip(b.categorical().iter())
            .map(|(x, y)| {
                let d = edit_distance(x, y) as f64;
                d * d
            })
            .sum();

        (numeric + categorical).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round2(x: f64) -> f64 {
        (x * 100.0).round() / 100.0
    }

    #[test]
    fn test_numeric_2d() {
        let a = Record::numeric_only(vec![2.0, 5.0]);
        let b = Record::numeric_only(vec![5.0, 10.0]);
        assert_eq!(round2(EuclideanDistance.measure(&a, &b)), 5.83);
    }

    #[test]
    fn test_numeric_3d() {
        let a = Record::numeric_only(vec![2.0, 5.0, 1.0]);
        let b = Record::numeric_only(vec![5.0, 10.0, 8.0]);
        assert_eq!(round2(EuclideanDistance.measure(&a, &b)), 9.11);
    }

    #[test]
    fn test_categorical_only() {
        let a = Record::categorical_only(["MIT"]);
        let b = Record::categorical_only(["NUC"]);
        assert_eq!(EuclideanDistance.measure(&a, &b), 3.0);
    }

    #[test]
    fn test_mixed_features() {
        let a = Record::new("", vec![4.0], vec!["MIT".into()]);
        let b = Record::new("", vec![2.0], vec!["NIV".into()]);
        assert_eq!(round2(EuclideanDistance.measure(&a, &b)), 2.83);
    }

    #[test]
    fn test_categorical_compared_by_position() {
        let a = Record::categorical_only(["red", "big"]);
        let b = Record::categorical_only(["big", "red"]);
        // Positional: "red"/"big" and "big"/"red", three edits each
        assert_eq!(EuclideanDistance.measure(&a, &b), (18.0f64).sqrt());
    }

    #[test]
    fn test_identity_and_symmetry() {
        let a = Record::new("", vec![1.5, -2.0], vec!["alpha".into()]);
        let b = Record::new("", vec![0.5, 4.0], vec!["beta".into()]);
        let metric = EuclideanDistance::new();

        assert_eq!(metric.measure(&a, &a), 0.0);
        assert_eq!(metric.measure(&a, &b), metric.measure(&b, &a));
        assert!(metric.measure(&a, &b) > 0.0);
    }
}
