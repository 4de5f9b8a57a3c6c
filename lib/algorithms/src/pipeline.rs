use crate::config::RunConfig;
use crate::registry::AlgorithmRegistry;
use crate::traits::ClusterAlgorithm;
use clusterx_core::{into_shared, CancelFlag, Cluster, FeatureStats, MeanNormalizer, Record, Result};
use clusterx_similarity::{DistanceMetric, MetricRegistry};
use std::sync::Arc;
use tracing::info;

/// Result of a pipeline run
#[derive(Debug, Clone)]
pub struct ClusteringOutcome {
    /// The dataset after normalization, shared with the clusters
    pub records: Vec<Arc<Record>>,
    pub clusters: Vec<Cluster>,
    /// Statistics used for normalization (empty when it was skipped)
    pub feature_stats: Vec<FeatureStats>,
}

/// Normalize, then cluster with the configured algorithm and metric
#[derive(Clone)]
pub struct ClusteringPipeline {
    normalizer: Option<MeanNormalizer>,
    algorithm: Arc<dyn ClusterAlgorithm>,
    metric: Arc<dyn DistanceMetric>,
}

impl ClusteringPipeline {
    /// Pipeline with normalization enabled
    pub fn new(algorithm: Arc<dyn ClusterAlgorithm>, metric: Arc<dyn DistanceMetric>) -> Self {
        Self {
            normalizer: Some(MeanNormalizer::new()),
            algorithm,
            metric,
        }
    }

    pub fn with_normalization(mut self, enabled: bool) -> Self {
        self.normalizer = enabled.then(MeanNormalizer::new);
        self
    }

    /// Resolve algorithm and metric names through the registries
    pub fn from_config(
        config: &RunConfig,
        algorithms: &AlgorithmRegistry,
        metrics: &MetricRegistry,
    ) -> Result<Self> {
        let algorithm = algorithms.create(&config.algorithm, &config.params)?;
        let metric = metrics.create(&config.metric)?;
        Ok(Self::new(algorithm, metric).with_normalization(config.normalize))
    }

    pub fn algorithm(&self) -> &dyn ClusterAlgorithm {
        self.algorithm.as_ref()
    }

    pub fn metric(&self) -> &dyn DistanceMetric {
        self.metric.as_ref()
    }

    pub fn normalizes(&self) -> bool {
        self.normalizer.is_some()
    }

    pub fn run(&self, records: Vec<Record>) -> Result<ClusteringOutcome> {
        self.run_with_cancel(records, &CancelFlag::new())
    }

    pub fn run_with_cancel(&self, records: Vec<Record>, cancel: &CancelFlag) -> Result<ClusteringOutcome> {
        let (records, feature_stats) = match &self.normalizer {
            Some(normalizer) => normalizer.normalize_with_stats(records),
            None => (records, Vec::new()),
        };

        let records = into_shared(records);
        info!(
            algorithm = self.algorithm.name(),
            metric = self.metric.name(),
            records = records.len(),
            "starting clustering run"
        );
        let clusters = self
            .algorithm
            .cluster_with_cancel(&records, self.metric.as_ref(), cancel)?;

        Ok(ClusteringOutcome {
            records,
            clusters,
            feature_stats,
        })
    }
}

impl std::fmt::Debug for ClusteringPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusteringPipeline")
            .field("normalize", &self.normalizer.is_some())
            .field("algorithm", &self.algorithm.name())
            .field("metric", &self.metric.name())
            .finish()
    }
}
