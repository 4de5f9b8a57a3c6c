//! Run configuration
//!
//! [`RunConfig`] selects an algorithm and a metric by name and carries the
//! algorithm parameters. It can be built in code or loaded from JSON:
//!
//! ```json
//! {
//!   "algorithm": "kmeans",
//!   "metric": "euclidean",
//!   "normalize": true,
//!   "params": { "k": 3, "max_rounds": 20, "seed": 42 }
//! }
//! ```

use crate::agglomerative::LinkageSearch;
use clusterx_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Algorithm parameters, as understood by the registry factories
///
/// Each algorithm reads only the fields it needs; a missing required field
/// is a configuration error when the algorithm is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlgorithmParams {
    /// Merges performed by agglomerative clustering
    pub round_limit: Option<usize>,
    /// Number of k-means clusters
    pub k: Option<usize>,
    /// Maximum k-means assign/update cycles
    pub max_rounds: Option<usize>,
    /// Seed for k-means centroid initialization
    pub seed: Option<u64>,
    /// Merge search strategy for agglomerative clustering
    pub linkage_search: Option<LinkageSearch>,
}

impl AlgorithmParams {
    /// Fetch a required parameter or fail with a configuration error
    pub fn require(value: Option<usize>, name: &str, algorithm: &str) -> Result<usize> {
        value.ok_or_else(|| {
            Error::InvalidConfig(format!("{} requires parameter '{}'", algorithm, name))
        })
    }
}

/// Everything needed to run one clustering pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Registry key of the clustering algorithm
    pub algorithm: String,
    /// Registry key of the distance metric
    pub metric: String,
    /// Mean-normalize numeric features before clustering
    pub normalize: bool,
    pub params: AlgorithmParams,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            algorithm: "kmeans".to_string(),
            metric: "euclidean".to_string(),
            normalize: true,
            params: AlgorithmParams::default(),
        }
    }
}

impl RunConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
