//! Agglomerative (bottom-up hierarchical) clustering with single linkage.
//!
//! # The Algorithm
//!
//! Every record starts in its own cluster. Each round merges the two
//! clusters with the smallest single-linkage distance:
//!
//! ```text
//! d(A, B) = min { metric(a, b) : a ∈ A, b ∈ B }
//! ```
//!
//! Pairs are scanned as `(i, j)` with `i < j` in ascending order and a pair
//! only replaces the current best when it is strictly closer, so ties go to
//! the lexicographically first pair. Cluster `j` is appended to cluster `i`
//! and removed from the list.
//!
//! The number of rounds is the only stopping rule: after `r` rounds there are
//! `n - r` clusters left. There is no distance threshold.
//!
//! ## Search strategies
//!
//! - [`LinkageSearch::Naive`] recomputes every single-linkage distance from
//!   scratch each round: `O(rounds · clusters² · size²)` metric calls.
//! - [`LinkageSearch::Cached`] computes the record distances once and keeps
//!   a cluster distance matrix, updated on merge with
//!   `d(A ∪ B, C) = min(d(A, C), d(B, C))`.
//!
//! Both produce the same merges in the same order.

use crate::traits::{degenerate_clusters, ClusterAlgorithm};
use clusterx_core::{CancelFlag, Cluster, Error, Record, Result};
use clusterx_similarity::DistanceMetric;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// How merge candidates are searched each round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkageSearch {
    /// Keep a cluster distance matrix and update it on merge
    #[default]
    Cached,
    /// Recompute all single-linkage distances every round
    Naive,
}

/// The pair of clusters chosen for a merge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeCandidate {
    pub left: usize,
    pub right: usize,
    pub distance: f64,
}

/// One executed merge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Merge {
    pub round: usize,
    /// Index of the surviving cluster
    pub left: usize,
    /// Index of the cluster that was absorbed and removed
    pub right: usize,
    pub distance: f64,
}

/// Output of [`Agglomerative::fit_with_cancel`]
#[derive(Debug, Clone)]
pub struct AgglomerativeFit {
    pub clusters: Vec<Cluster>,
    pub merges: Vec<Merge>,
}

/// Single-linkage agglomerative clustering bounded by a round count.
#[derive(Debug, Clone)]
pub struct Agglomerative {
    round_limit: usize,
    search: LinkageSearch,
}

impl Agglomerative {
    /// Create a clusterer that performs `round_limit` merges.
    ///
    /// The limit is checked against the dataset when clustering starts; it
    /// must satisfy `0 < round_limit < n`.
    pub fn new(round_limit: usize) -> Self {
        Self {
            round_limit,
            search: LinkageSearch::default(),
        }
    }

    pub fn with_search(mut self, search: LinkageSearch) -> Self {
        self.search = search;
        self
    }

    pub fn round_limit(&self) -> usize {
        self.round_limit
    }

    pub fn search(&self) -> LinkageSearch {
        self.search
    }

    pub fn validate(&self, n_records: usize) -> Result<()> {
        if self.round_limit == 0 || self.round_limit >= n_records {
            return Err(Error::InvalidRoundLimit {
                round_limit: self.round_limit,
                n_records,
            });
        }
        Ok(())
    }

    /// Smallest metric value over every cross pair of the two clusters.
    ///
    /// Returns `f64::MAX` when no pair has a comparable distance (empty
    /// clusters, or only NaN distances).
    pub fn single_linkage(a: &Cluster, b: &Cluster, metric: &dyn DistanceMetric) -> f64 {
        let mut smallest = f64::MAX;
        for x in a {
            for y in b {
                let distance = metric.measure(x, y);
                if distance < smallest {
                    smallest = distance;
                }
            }
        }
        smallest
    }

    /// Closest pair of clusters; the first pair in scan order wins ties.
    pub fn find_merge_candidates(clusters: &[Cluster], metric: &dyn DistanceMetric) -> MergeCandidate {
        closest_pair(clusters.len(), |i, j| {
            Self::single_linkage(&clusters[i], &clusters[j], metric)
        })
    }

    /// Append cluster `right` to cluster `left` and remove `right`.
    pub fn merge_clusters(clusters: &mut Vec<Cluster>, left: usize, right: usize) {
        debug_assert!(left < right);
        let absorbed = clusters.remove(right);
        clusters[left].absorb(absorbed);
    }

    /// Run the clustering and also report every merge performed.
    pub fn fit_with_cancel(
        &self,
        records: &[Arc<Record>],
        metric: &dyn DistanceMetric,
        cancel: &CancelFlag,
    ) -> Result<AgglomerativeFit> {
        if let Some(clusters) = degenerate_clusters(records) {
            return Ok(AgglomerativeFit {
                clusters,
                merges: Vec::new(),
            });
        }
        self.validate(records.len())?;

        let mut clusters: Vec<Cluster> = records.iter().cloned().map(Cluster::singleton).collect();
        let mut merges = Vec::with_capacity(self.round_limit);
        let mut matrix = match self.search {
            LinkageSearch::Cached => Some(LinkageMatrix::build(&clusters, metric, cancel)?),
            LinkageSearch::Naive => None,
        };

        let mut round = 0;
        while clusters.len() > 1 && round < self.round_limit {
            cancel.check(round)?;

            let candidate = match matrix.as_ref() {
                Some(m) => m.closest_pair(),
                None => Self::find_merge_candidates(&clusters, metric),
            };
            if let Some(m) = matrix.as_mut() {
                m.merge(candidate.left, candidate.right);
            }
            Self::merge_clusters(&mut clusters, candidate.left, candidate.right);

            debug!(
                round,
                left = candidate.left,
                right = candidate.right,
                distance = candidate.distance,
                remaining = clusters.len(),
                "merged clusters"
            );
            merges.push(Merge {
                round,
                left: candidate.left,
                right: candidate.right,
                distance: candidate.distance,
            });
            round += 1;
        }

        info!(
            records = records.len(),
            rounds = round,
            clusters = clusters.len(),
            "agglomerative clustering finished"
        );
        Ok(AgglomerativeFit { clusters, merges })
    }
}

impl ClusterAlgorithm for Agglomerative {
    fn name(&self) -> &'static str {
        "Agglomerative"
    }

    fn cluster_with_cancel(
        &self,
        records: &[Arc<Record>],
        metric: &dyn DistanceMetric,
        cancel: &CancelFlag,
    ) -> Result<Vec<Cluster>> {
        self.fit_with_cancel(records, metric, cancel).map(|fit| fit.clusters)
    }
}

/// Scan pairs `(i, j)`, `i < j`, and keep the first strictly smallest one.
///
/// Starts from `(0, 1)` at `f64::MAX`, so if nothing is smaller the first
/// pair is merged.
fn closest_pair(n: usize, distance: impl Fn(usize, usize) -> f64) -> MergeCandidate {
    let mut best = MergeCandidate {
        left: 0,
        right: 1,
        distance: f64::MAX,
    };
    for i in 0..n {
        for j in (i + 1)..n {
            let d = distance(i, j);
            if d < best.distance {
                best = MergeCandidate {
                    left: i,
                    right: j,
                    distance: d,
                };
            }
        }
    }
    best
}

/// Symmetric single-linkage distances between the current clusters
struct LinkageMatrix {
    distances: Vec<Vec<f64>>,
}

impl LinkageMatrix {
    /// Polls `cancel` once per row; building is the costliest step of a run.
    fn build(clusters: &[Cluster], metric: &dyn DistanceMetric, cancel: &CancelFlag) -> Result<Self> {
        let n = clusters.len();
        let mut distances = vec![vec![f64::MAX; n]; n];
        for i in 0..n {
            cancel.check(0)?;
            for j in (i + 1)..n {
                let d = Agglomerative::single_linkage(&clusters[i], &clusters[j], metric);
                distances[i][j] = d;
                distances[j][i] = d;
            }
        }
        Ok(Self { distances })
    }

    fn closest_pair(&self) -> MergeCandidate {
        closest_pair(self.distances.len(), |i, j| self.distances[i][j])
    }

    fn merge(&mut self, left: usize, right: usize) {
        let n = self.distances.len();
        for k in 0..n {
            if k == left || k == right {
                continue;
            }
            // Stored values are never NaN, so `min` matches the naive scan.
            let d = self.distances[left][k].min(self.distances[right][k]);
            self.distances[left][k] = d;
            self.distances[k][left] = d;
        }
        self.distances.remove(right);
        for row in &mut self.distances {
            row.remove(right);
        }
    }
}
