//! Serializable summary of a clustering run

use clusterx_core::{Cluster, Error, FeatureStats, Record, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One record as it was read, before normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberSummary {
    pub text: String,
    pub numeric: Vec<f64>,
    pub categorical: Vec<String>,
}

impl MemberSummary {
    pub fn from_record(record: &Record) -> Self {
        Self {
            text: record.original_text().to_string(),
            numeric: record.original_numeric().to_vec(),
            categorical: record.categorical().to_vec(),
        }
    }

    /// Source text, or the features when the record was built in code
    fn label(&self) -> String {
        if !self.text.is_empty() {
            return self.text.clone();
        }
        self.numeric
            .iter()
            .map(|v| v.to_string())
            .chain(self.categorical.iter().cloned())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub size: usize,
    pub members: Vec<MemberSummary>,
}

/// Clusters produced by one run, with the names of what produced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterReport {
    pub algorithm: String,
    pub metric: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub records: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub feature_stats: Vec<FeatureStats>,
    pub clusters: Vec<ClusterSummary>,
}

impl ClusterReport {
    pub fn new(algorithm: impl Into<String>, metric: impl Into<String>, clusters: &[Cluster]) -> Self {
        let clusters: Vec<ClusterSummary> = clusters
            .iter()
            .map(|cluster| ClusterSummary {
                size: cluster.len(),
                members: cluster.iter().map(|r| MemberSummary::from_record(r)).collect(),
            })
            .collect();

        Self {
            algorithm: algorithm.into(),
            metric: metric.into(),
            source: None,
            records: clusters.iter().map(|c| c.size).sum(),
            feature_stats: Vec::new(),
            clusters,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_feature_stats(mut self, stats: Vec<FeatureStats>) -> Self {
        self.feature_stats = stats;
        self
    }

    /// Non-finite statistics are written as `null`
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }
}

impl fmt::Display for ClusterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            writeln!(f, "Dataset: {}", source)?;
        }
        writeln!(f, "Algorithm: {}", self.algorithm)?;
        writeln!(f, "Metric: {}", self.metric)?;
        writeln!(f, "Records: {}", self.records)?;
        write!(f, "Clusters: {}", self.clusters.len())?;

        for (index, cluster) in self.clusters.iter().enumerate() {
            write!(f, "\n\nCluster {} ({} records)", index + 1, cluster.size)?;
            for member in &cluster.members {
                write!(f, "\n  {}", member.label())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn clusters() -> Vec<Cluster> {
        let a = Arc::new(Record::new("2,MIT", vec![2.0], vec!["MIT".to_string()]));
        let b = Arc::new(Record::new("4,NUC", vec![4.0], vec!["NUC".to_string()]));
        let c = Arc::new(Record::numeric_only(vec![10.0]));
        vec![Cluster::from_records(vec![a, b]), Cluster::singleton(c)]
    }

    #[test]
    fn test_report_counts() {
        let report = ClusterReport::new("Agglomerative", "Euclidean Distance", &clusters());
        assert_eq!(report.records, 3);
        assert_eq!(report.clusters.len(), 2);
        assert_eq!(report.clusters[0].size, 2);
        assert_eq!(report.clusters[0].members[1].text, "4,NUC");
    }

    #[test]
    fn test_report_uses_original_values() {
        let mut record = Record::new("10", vec![10.0], Vec::new());
        record.set_numeric(0, 0.5);
        let report = ClusterReport::new(
            "K-means",
            "Euclidean Distance",
            &[Cluster::singleton(Arc::new(record))],
        );
        assert_eq!(report.clusters[0].members[0].numeric, vec![10.0]);
    }

    #[test]
    fn test_text_rendering() {
        let report = ClusterReport::new("Agglomerative", "Euclidean Distance", &clusters())
            .with_source("yeast.data");
        let text = report.to_string();

        assert!(text.starts_with("Dataset: yeast.data\nAlgorithm: Agglomerative\n"));
        assert!(text.contains("Cluster 1 (2 records)\n  2,MIT\n  4,NUC"));
        // No source text, falls back to the features
        assert!(text.ends_with("Cluster 2 (1 records)\n  10"));
    }

    #[test]
    fn test_json_round_trip() {
        let report = ClusterReport::new("Agglomerative", "Euclidean Distance", &clusters())
            .with_feature_stats(vec![FeatureStats { min: 2.0, max: 10.0, mean: 6.0 }]);
        let json = report.to_json().unwrap();
        assert!(json.contains("\"algorithm\": \"Agglomerative\""));
        assert!(!json.contains("\"source\""));

        let parsed = ClusterReport::from_json(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_json_non_finite_stats() {
        let report = ClusterReport::new("K-means", "Euclidean Distance", &clusters())
            .with_feature_stats(vec![FeatureStats { min: 1.0, max: 1.0, mean: f64::NAN }]);
        let json = report.to_json().unwrap();
        assert!(json.contains("\"mean\": null"));
    }
}
