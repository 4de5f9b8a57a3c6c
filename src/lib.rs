//! # ClusterX
//!
//! Clustering for datasets that mix numeric and categorical features.
//!
//! Numeric features are mean-normalized, categorical features are compared
//! by edit distance, and two algorithms group the records:
//!
//! - **Agglomerative**: single-linkage hierarchical merging for a fixed
//!   number of rounds
//! - **K-means**: random data-point seeding, then alternating assignment and
//!   centroid updates; seedable for reproducible runs
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! cargo install clusterx
//! clusterx yeast.data --algorithm kmeans --k 10 --max-rounds 50 --seed 7
//! clusterx iris.data --algorithm agglomerative --round-limit 147 --format json
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use clusterx::prelude::*;
//! use std::io::Cursor;
//!
//! let data = "2,MIT\n4,NUC\n10,MIT\n";
//! let dataset = DelimitedParser::new().read(Cursor::new(data)).unwrap();
//!
//! let pipeline = ClusteringPipeline::new(
//!     std::sync::Arc::new(Agglomerative::new(1)),
//!     std::sync::Arc::new(EuclideanDistance),
//! );
//! let outcome = pipeline.run(dataset.into_records()).unwrap();
//! assert_eq!(outcome.clusters.len(), 2);
//!
//! let report = ClusterReport::new("Agglomerative", "Euclidean Distance", &outcome.clusters);
//! println!("{}", report);
//! ```
//!
//! ## Crate Structure
//!
//! ClusterX is composed of several crates:
//!
//! - [`clusterx-core`](https://docs.rs/clusterx-core) - Records, clusters, normalization, errors
//! - [`clusterx-similarity`](https://docs.rs/clusterx-similarity) - Distance metrics and the metric registry
//! - [`clusterx-algorithms`](https://docs.rs/clusterx-algorithms) - Agglomerative, k-means, pipeline, worker
//! - [`clusterx-dataset`](https://docs.rs/clusterx-dataset) - Delimited text parser and run reports

// Re-export core types
pub use clusterx_core::{
    into_shared, CancelFlag, Cluster, Error, FeatureStats, MeanNormalizer, Record, Result,
};

// Re-export similarity
pub use clusterx_similarity::{edit_distance, DistanceMetric, EuclideanDistance, MetricRegistry};

// Re-export algorithms
pub use clusterx_algorithms::{
    Agglomerative, AlgorithmParams, AlgorithmRegistry, ClusterAlgorithm, ClusteringOutcome,
    ClusteringPipeline, ClusteringWorker, JobHandle, KMeans, KMeansFit, LinkageSearch, RunConfig,
};

// Re-export dataset handling
pub use clusterx_dataset::{ClusterReport, DelimitedParser, ParsedDataset};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Agglomerative, AlgorithmParams, AlgorithmRegistry, CancelFlag, Cluster, ClusterAlgorithm,
        ClusterReport, ClusteringPipeline, ClusteringWorker, DelimitedParser, DistanceMetric,
        Error, EuclideanDistance, KMeans, MeanNormalizer, MetricRegistry, Record, Result,
        RunConfig,
    };
}
