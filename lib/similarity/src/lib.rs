//! # ClusterX Similarity
//!
//! Pluggable distance metrics for mixed numeric/categorical records.
//!
//! ## Features
//!
//! - **DistanceMetric**: Trait every metric implements; algorithms only see this
//! - **EuclideanDistance**: Numeric squared differences plus squared edit
//!   distances between categorical values at the same position
//! - **MetricRegistry**: Name → constructor mapping used to select a metric at runtime
//!
//! ## Example
//!
//! ```rust
//! use clusterx_core::Record;
//! use clusterx_similarity::{DistanceMetric, MetricRegistry};
//!
//! let registry = MetricRegistry::with_defaults();
//! let metric = registry.create("euclidean").unwrap();
//!
//! let a = Record::new("4,MIT", vec![4.0], vec!["MIT".to_string()]);
//! let b = Record::new("2,NIV", vec![2.0], vec!["NIV".to_string()]);
//! let d = metric.measure(&a, &b);
//! assert!((d - 8f64.sqrt()).abs() < 1e-12);
//! ```

pub mod distance;
pub mod metric;
pub mod registry;

pub use distance::{edit_distance, squared_euclidean};
pub use metric::{DistanceMetric, EuclideanDistance};
pub use registry::{MetricFactory, MetricRegistry};
