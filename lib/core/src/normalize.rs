//! Mean normalization of numeric features
//!
//! Every numeric feature is rescaled independently to
//! `(value - mean) / (max - min)` so features with large magnitudes do not
//! dominate distance computations. Categorical features and the original
//! numeric snapshot of each record are left as they are.
//!
//! A feature that is constant across the dataset has a zero range and
//! normalizes to NaN. The value is propagated unchanged; a warning is logged
//! so the caller can decide what to do about it.

use crate::Record;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Statistics of one numeric feature across a dataset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl FeatureStats {
    #[inline]
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Scale a single value with these statistics.
    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        (value - self.mean) / self.range()
    }
}

/// Per-feature mean normalizer
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanNormalizer;

impl MeanNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Compute min, max and mean of every numeric feature.
    ///
    /// The feature count is taken from the first record; every record is
    /// expected to share it.
    pub fn feature_stats(&self, records: &[Record]) -> Vec<FeatureStats> {
        let Some(first) = records.first() else {
            return Vec::new();
        };

        (0..first.num_numeric())
            .map(|feature| {
                let mut min = first.numeric_at(feature);
                let mut max = min;
                let mut sum = 0.0;

                for record in records {
                    let value = record.numeric_at(feature);
                    sum += value;
                    if value < min {
                        min = value;
                    }
                    if value > max {
                        max = value;
                    }
                }

                FeatureStats {
                    min,
                    max,
                    mean: sum / records.len() as f64,
                }
            })
            .collect()
    }

    /// Normalize all numeric features in place and hand the dataset back.
    pub fn normalize(&self, records: Vec<Record>) -> Vec<Record> {
        self.normalize_with_stats(records).0
    }

    /// Like [`normalize`](Self::normalize), also returning the statistics
    /// the values were scaled with.
    pub fn normalize_with_stats(&self, mut records: Vec<Record>) -> (Vec<Record>, Vec<FeatureStats>) {
        let stats = self.feature_stats(&records);

        for (feature, stat) in stats.iter().enumerate() {
            if stat.range() == 0.0 {
                warn!(
                    feature,
                    value = stat.min,
                    "numeric feature is constant; normalized values will not be finite"
                );
            }
            for record in records.iter_mut() {
                let scaled = stat.apply(record.numeric_at(feature));
                record.set_numeric(feature, scaled);
            }
        }

        debug!(records = records.len(), features = stats.len(), "normalized dataset");
        (records, stats)
    }
}
