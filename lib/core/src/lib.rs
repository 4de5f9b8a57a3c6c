//! # ClusterX Core
//!
//! Core data model for the ClusterX clustering engine.
//!
//! This crate provides the types every other ClusterX crate builds on:
//!
//! - [`Record`] - One sample with numeric and categorical features
//! - [`Cluster`] - An ordered group of shared records
//! - [`MeanNormalizer`] - Per-feature mean normalization
//! - [`CancelFlag`] - Cooperative cancellation checked between rounds
//!
//! ## Example
//!
//! ```rust
//! use clusterx_core::{Cluster, MeanNormalizer, Record};
//! use std::sync::Arc;
//!
//! let records = vec![
//!     Record::new("2,MIT", vec![2.0], vec!["MIT".to_string()]),
//!     Record::new("10,NUC", vec![10.0], vec!["NUC".to_string()]),
//! ];
//!
//! // Normalization takes ownership and hands the dataset back
//! let records = MeanNormalizer::new().normalize(records);
//! assert_eq!(records[0].numeric(), &[-0.5]);
//! assert_eq!(records[0].original_numeric(), &[2.0]);
//!
//! // Clusters share records instead of copying them
//! let shared: Vec<Arc<Record>> = records.into_iter().map(Arc::new).collect();
//! let cluster = Cluster::from_records(shared.clone());
//! assert!(cluster.contains(&shared[1]));
//! ```

pub mod cancel;
pub mod cluster;
pub mod error;
pub mod normalize;
pub mod record;

pub use cancel::CancelFlag;
pub use cluster::Cluster;
pub use error::{Error, Result};
pub use normalize::{FeatureStats, MeanNormalizer};
pub use record::Record;

/// Wrap owned records in `Arc` so clusters can share them.
pub fn into_shared(records: Vec<Record>) -> Vec<std::sync::Arc<Record>> {
    records.into_iter().map(std::sync::Arc::new).collect()
}
