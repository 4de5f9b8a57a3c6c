//! # ClusterX Algorithms
//!
//! Clustering strategies for mixed numeric/categorical records.
//!
//! ## Algorithms
//!
//! ### Agglomerative
//!
//! Bottom-up hierarchical clustering with single linkage. Every record starts
//! alone; each round merges the two closest clusters. The round limit is the
//! only stopping rule, so `n` records and `r` rounds always give `n - r`
//! clusters.
//!
//! ### K-means
//!
//! Random initial centroids taken from the data, then alternating
//! assignment and mean updates until no centroid moves or the round budget
//! is spent. Seedable for reproducible runs.
//!
//! ## Running
//!
//! Algorithms can be used directly, or selected by name through
//! [`AlgorithmRegistry`] and wrapped in a [`ClusteringPipeline`] that
//! normalizes first. [`ClusteringWorker`] runs pipelines on a background
//! thread with cancellation.
//!
//! ```rust
//! use clusterx_algorithms::{Agglomerative, ClusterAlgorithm};
//! use clusterx_core::{into_shared, Record};
//! use clusterx_similarity::EuclideanDistance;
//!
//! let records = into_shared(vec![
//!     Record::numeric_only(vec![2.0]),
//!     Record::numeric_only(vec![4.0]),
//!     Record::numeric_only(vec![10.0]),
//! ]);
//!
//! let clusters = Agglomerative::new(2).cluster(&records, &EuclideanDistance).unwrap();
//! assert_eq!(clusters.len(), 1);
//!
//! let order: Vec<f64> = clusters[0].iter().map(|r| r.numeric_at(0)).collect();
//! assert_eq!(order, vec![2.0, 4.0, 10.0]);
//! ```

pub mod agglomerative;
pub mod config;
pub mod kmeans;
pub mod pipeline;
pub mod registry;
mod traits;
pub mod worker;

pub use agglomerative::{Agglomerative, AgglomerativeFit, LinkageSearch, Merge, MergeCandidate};
pub use config::{AlgorithmParams, RunConfig};
pub use kmeans::{KMeans, KMeansFit};
pub use pipeline::{ClusteringOutcome, ClusteringPipeline};
pub use registry::{AlgorithmFactory, AlgorithmRegistry};
pub use traits::ClusterAlgorithm;
pub use worker::{ClusteringWorker, JobHandle, JobId};
