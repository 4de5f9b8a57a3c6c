//! Name-keyed registry of distance metrics

use crate::metric::{DistanceMetric, EuclideanDistance};
use ahash::AHashMap;
use clusterx_core::{Error, Result};
use std::sync::Arc;

/// Constructor stored in the registry
pub type MetricFactory = fn() -> Arc<dyn DistanceMetric>;

/// Maps metric names to constructors
#[derive(Clone)]
pub struct MetricRegistry {
    factories: AHashMap<String, MetricFactory>,
}

impl MetricRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self {
            factories: AHashMap::new(),
        }
    }

    /// Registry holding the built-in metrics
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("euclidean", || Arc::new(EuclideanDistance::new()));
        registry
    }

    /// Add or replace a metric under `name`
    pub fn register(&mut self, name: impl Into<String>, factory: MetricFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Build the metric registered under `name`
    pub fn create(&self, name: &str) -> Result<Arc<dyn DistanceMetric>> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| Error::UnknownMetric(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for MetricRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
