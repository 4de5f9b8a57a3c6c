use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid round limit: {round_limit} (must be > 0 and < {n_records} records)")]
    InvalidRoundLimit { round_limit: usize, n_records: usize },

    #[error("Invalid cluster count: requested {requested}, but dataset has {n_records} records")]
    InvalidClusterCount { requested: usize, n_records: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Cluster {index} has no records; cannot compute its centroid")]
    EmptyCluster { index: usize },

    #[error("Clustering cancelled before round {round}")]
    Cancelled { round: usize },

    #[error("Unknown clustering algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Unknown distance metric: {0}")]
    UnknownMetric(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Worker error: {0}")]
    Worker(String),
}

impl Error {
    /// True for errors caused by out-of-range or missing configuration,
    /// which a caller can fix by asking for new settings.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidRoundLimit { .. }
                | Error::InvalidClusterCount { .. }
                | Error::InvalidConfig(_)
                | Error::UnknownAlgorithm(_)
                | Error::UnknownMetric(_)
        )
    }
}
