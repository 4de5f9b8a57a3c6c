//! K-means clustering for mixed numeric/categorical records.
//!
//! Lloyd iterations with a pluggable metric:
//!
//! 1. Pick `k` distinct records uniformly at random as the initial centroids.
//! 2. Assign every record to its nearest centroid.
//! 3. Recompute each centroid from its members.
//! 4. Stop when no centroid moved, or after `max_rounds` assign/update cycles.
//!
//! Centroids are synthetic [`Record`]s so any [`DistanceMetric`] can compare
//! them with data records. Their numeric features are the member means; their
//! categorical features are the most frequent member value at each position.
//!
//! A record whose numeric features equal a centroid's exactly is assigned to
//! it without calling the metric. NaN compares equal to NaN here, so records
//! carrying a normalized constant feature still match. Initial centroids are
//! drawn from records with pairwise distinct numeric features, and in the
//! first round each source record is assigned to its own centroid by
//! identity, so no centroid starts out empty.

use crate::traits::{degenerate_clusters, ClusterAlgorithm};
use ahash::AHashSet;
use clusterx_core::{CancelFlag, Cluster, Error, Record, Result};
use clusterx_similarity::DistanceMetric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::{debug, info};

/// K-means clusterer.
#[derive(Debug, Clone)]
pub struct KMeans {
    k: usize,
    max_rounds: usize,
    seed: Option<u64>,
}

/// Output of a k-means run.
#[derive(Debug, Clone)]
pub struct KMeansFit {
    /// Clusters from the last assignment step
    pub clusters: Vec<Cluster>,
    /// Centroids those clusters were assigned against
    pub centroids: Vec<Record>,
    /// Assignment/update cycles performed
    pub rounds: usize,
    /// Whether the run stopped because no centroid moved
    pub converged: bool,
}

impl KMeans {
    /// Create a clusterer for `k` clusters with at most `max_rounds` cycles.
    ///
    /// Constraints (`0 < k < n`, `max_rounds > 0`) are checked when
    /// clustering starts.
    pub fn new(k: usize, max_rounds: usize) -> Self {
        Self {
            k,
            max_rounds,
            seed: None,
        }
    }

    /// Seed the centroid initialization for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn validate(&self, n_records: usize) -> Result<()> {
        if self.k == 0 || self.k >= n_records {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_records,
            });
        }
        if self.max_rounds == 0 {
            return Err(Error::InvalidConfig(
                "max_rounds must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Pick the source records of the `k` initial centroids.
    ///
    /// Records are visited in uniformly random order and a record is taken
    /// only if no record already taken has the same numeric features. Fails
    /// with a configuration error when the dataset has fewer than `k`
    /// distinct numeric vectors.
    pub fn choose_initial_sources<R: Rng + ?Sized>(
        &self,
        records: &[Arc<Record>],
        rng: &mut R,
    ) -> Result<Vec<Arc<Record>>> {
        let mut seen: AHashSet<Vec<u64>> = AHashSet::with_capacity(self.k);
        let mut sources = Vec::with_capacity(self.k);

        for i in rand::seq::index::sample(rng, records.len(), records.len()) {
            if seen.insert(numeric_key(records[i].numeric())) {
                sources.push(records[i].clone());
                if sources.len() == self.k {
                    return Ok(sources);
                }
            }
        }

        Err(Error::InvalidConfig(format!(
            "k = {} exceeds the {} distinct numeric records in the dataset",
            self.k,
            sources.len()
        )))
    }

    /// Copies of the initial centroid records.
    pub fn choose_initial_centroids<R: Rng + ?Sized>(
        &self,
        records: &[Arc<Record>],
        rng: &mut R,
    ) -> Result<Vec<Record>> {
        let sources = self.choose_initial_sources(records, rng)?;
        Ok(sources.iter().map(|r| centroid_from(r)).collect())
    }

    /// Assign every record to its nearest centroid.
    ///
    /// `sources[i]`, when given, is the record centroid `i` was copied from
    /// and is assigned to it unconditionally. Otherwise ties go to the lowest
    /// centroid index, and records numerically equal to a centroid get
    /// distance 0 without a metric call.
    pub fn assign(
        records: &[Arc<Record>],
        centroids: &[Record],
        sources: &[Arc<Record>],
        metric: &dyn DistanceMetric,
    ) -> Vec<Cluster> {
        let mut clusters = vec![Cluster::new(); centroids.len()];

        for record in records {
            if let Some(own) = sources.iter().position(|s| Arc::ptr_eq(s, record)) {
                clusters[own].push(record.clone());
                continue;
            }

            let mut best = 0;
            let mut min_distance = f64::MAX;

            for (i, centroid) in centroids.iter().enumerate() {
                if same_numeric(record.numeric(), centroid.numeric()) {
                    if 0.0 < min_distance {
                        best = i;
                    }
                    // Nothing later can be strictly closer than zero
                    break;
                }
                let distance = metric.measure(record, centroid);
                if distance < min_distance {
                    min_distance = distance;
                    best = i;
                }
            }
            clusters[best].push(record.clone());
        }
        clusters
    }

    /// Recompute centroids from cluster members.
    ///
    /// An empty cluster has no centroid and is reported as an error.
    pub fn update(clusters: &[Cluster]) -> Result<Vec<Record>> {
        clusters
            .iter()
            .enumerate()
            .map(|(index, cluster)| match cluster.records() {
                [] => Err(Error::EmptyCluster { index }),
                [only] => Ok(centroid_from(only)),
                members => Ok(mean_centroid(members)),
            })
            .collect()
    }

    /// True if any centroid's numeric features differ between rounds.
    ///
    /// A feature that stays NaN counts as unchanged.
    pub fn centroids_changed(old: &[Record], new: &[Record]) -> bool {
        old.iter()
            .zip(new.iter())
            .any(|(a, b)| !same_numeric(a.numeric(), b.numeric()))
    }

    /// Run with a seeded or OS-seeded generator, depending on configuration.
    pub fn fit_with_cancel(
        &self,
        records: &[Arc<Record>],
        metric: &dyn DistanceMetric,
        cancel: &CancelFlag,
    ) -> Result<KMeansFit> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.fit_with_rng(records, metric, &mut rng, cancel)
    }

    /// Run using the given random source for centroid initialization.
    pub fn fit_with_rng<R: Rng + ?Sized>(
        &self,
        records: &[Arc<Record>],
        metric: &dyn DistanceMetric,
        rng: &mut R,
        cancel: &CancelFlag,
    ) -> Result<KMeansFit> {
        if let Some(clusters) = degenerate_clusters(records) {
            let centroids = clusters
                .iter()
                .filter_map(|c| c.get(0))
                .map(|r| centroid_from(r))
                .collect();
            return Ok(KMeansFit {
                clusters,
                centroids,
                rounds: 0,
                converged: true,
            });
        }
        self.validate(records.len())?;

        let sources = self.choose_initial_sources(records, rng)?;
        let mut centroids: Vec<Record> = sources.iter().map(|r| centroid_from(r)).collect();
        let mut clusters = Vec::new();
        let mut rounds = 0;
        let mut converged = false;

        while rounds < self.max_rounds {
            cancel.check(rounds)?;

            // Sources anchor their centroids in the first round only
            let anchors: &[Arc<Record>] = if rounds == 0 { &sources } else { &[] };
            clusters = Self::assign(records, &centroids, anchors, metric);
            let next = Self::update(&clusters)?;
            rounds += 1;

            if !Self::centroids_changed(&centroids, &next) {
                converged = true;
                break;
            }
            debug!(round = rounds, "centroids moved");
            centroids = next;
        }

        info!(
            records = records.len(),
            k = self.k,
            rounds,
            converged,
            "k-means clustering finished"
        );
        Ok(KMeansFit {
            clusters,
            centroids,
            rounds,
            converged,
        })
    }
}

impl ClusterAlgorithm for KMeans {
    fn name(&self) -> &'static str {
        "K-means"
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

fn centroid_from(record: &Record) -> Record {
    Record::new(
        String::new(),
        record.numeric().to_vec(),
        record.categorical().to_vec(),
    )
}

/// Feature-wise equality where NaN equals NaN
fn same_numeric(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| x == y || (x.is_nan() && y.is_nan()))
}

/// Hash key agreeing with [`same_numeric`]
fn numeric_key(values: &[f64]) -> Vec<u64> {
    values
        .iter()
        .map(|v| {
            if v.is_nan() {
                f64::NAN.to_bits()
            } else if *v == 0.0 {
                0
            } else {
                v.to_bits()
            }
        })
        .collect()
}

/// Coordinate-wise mean of numeric features plus per-position categorical mode.
///
/// The mean is taken relative to the first member, so members with identical
/// values reproduce that value exactly.
fn mean_centroid(members: &[Arc<Record>]) -> Record {
    let first = &members[0];
    let mut offsets = vec![0.0; first.num_numeric()];
    for record in &members[1..] {
        for ((offset, value), base) in offsets.iter_mut().zip(record.numeric()).zip(first.numeric()) {
            *offset += value - base;
        }
    }
    let count = members.len() as f64;
    let numeric = first
        .numeric()
        .iter()
        .zip(offsets)
        .map(|(base, offset)| base + offset / count)
        .collect();

    let categorical = (0..first.num_categorical())
        .map(|position| categorical_mode(members, position))
        .collect();

    Record::new(String::new(), numeric, categorical)
}

/// Most frequent value at `position`; ties go to the value seen first.
fn categorical_mode(members: &[Arc<Record>], position: usize) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for record in members {
        let value = record.categorical_at(position);
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best = counts[0];
    for &(value, count) in &counts[1..] {
        if count > best.1 {
            best = (value, count);
        }
    }
    best.0.to_string()
}
