//! Name-keyed registry of clustering algorithms

use crate::agglomerative::Agglomerative;
use crate::config::AlgorithmParams;
use crate::kmeans::KMeans;
use crate::traits::ClusterAlgorithm;
use ahash::AHashMap;
use clusterx_core::{Error, Result};
use std::sync::Arc;

/// Builds an algorithm from generic parameters
pub type AlgorithmFactory = fn(&AlgorithmParams) -> Result<Arc<dyn ClusterAlgorithm>>;

/// Maps algorithm names to factories
#[derive(Clone)]
pub struct AlgorithmRegistry {
    factories: AHashMap<String, AlgorithmFactory>,
}

fn build_agglomerative(params: &AlgorithmParams) -> Result<Arc<dyn ClusterAlgorithm>> {
    let round_limit = AlgorithmParams::require(params.round_limit, "round_limit", "agglomerative")?;
    let mut algorithm = Agglomerative::new(round_limit);
    if let Some(search) = params.linkage_search {
        algorithm = algorithm.with_search(search);
    }
    Ok(Arc::new(algorithm))
}

fn build_kmeans(params: &AlgorithmParams) -> Result<Arc<dyn ClusterAlgorithm>> {
    let k = AlgorithmParams::require(params.k, "k", "kmeans")?;
    let max_rounds = AlgorithmParams::require(params.max_rounds, "max_rounds", "kmeans")?;
    let mut algorithm = KMeans::new(k, max_rounds);
    if let Some(seed) = params.seed {
        algorithm = algorithm.with_seed(seed);
    }
    Ok(Arc::new(algorithm))
}

impl AlgorithmRegistry {
    pub fn new() -> Self {
        Self {
            factories: AHashMap::new(),
        }
    }

    /// Registry holding `agglomerative` and `kmeans`
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("agglomerative", build_agglomerative);
        registry.register("kmeans", build_kmeans);
        registry
    }

    /// Add or replace an algorithm under `name`
    pub fn register(&mut self, name: impl Into<String>, factory: AlgorithmFactory) {
        self.factories.insert(name.into(), factory);
    }

    /// Build the algorithm registered under `name`
    pub fn create(&self, name: &str, params: &AlgorithmParams) -> Result<Arc<dyn ClusterAlgorithm>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| Error::UnknownAlgorithm(name.to_string()))?;
        factory(params)
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

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
