use clusterx_core::{CancelFlag, Cluster, Record, Result};
use clusterx_similarity::DistanceMetric;
use std::sync::Arc;

/// Common interface for clustering strategies.
pub trait ClusterAlgorithm: Send + Sync {
    /// Human-readable name shown to users.
    fn name(&self) -> &'static str;

    /// Partition `records` into clusters, polling `cancel` between rounds.
    ///
    /// Configuration is validated against the dataset before any work is
    /// done. Every input record appears in exactly one output cluster.
    fn cluster_with_cancel(
        &self,
        records: &[Arc<Record>],
        metric: &dyn DistanceMetric,
        cancel: &CancelFlag,
    ) -> Result<Vec<Cluster>>;

    /// Partition `records` into clusters without cancellation.
    fn cluster(&self, records: &[Arc<Record>], metric: &dyn DistanceMetric) -> Result<Vec<Cluster>> {
        self.cluster_with_cancel(records, metric, &CancelFlag::new())
    }
}

/// Result for inputs too small to cluster: nothing for an empty dataset,
/// one singleton for a single record.
pub(crate) fn degenerate_clusters(records: &[Arc<Record>]) -> Option<Vec<Cluster>> {
    match records {
        [] => Some(Vec::new()),
        [only] => Some(vec![Cluster::singleton(only.clone())]),
        _ => None,
    }
}
