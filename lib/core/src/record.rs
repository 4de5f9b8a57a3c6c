use serde::{Deserialize, Serialize};

/// One sample of a dataset: numeric and categorical features plus the raw
/// text it was read from.
///
/// Numeric features are the working values used for normalization and
/// distance computation. A copy of them is taken at construction time and
/// never touched again, so clustering output can still show the values as
/// they were read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    numeric: Vec<f64>,
    categorical: Vec<String>,
    original_text: String,
    original_numeric: Vec<f64>,
}

impl Record {
    /// Create a record, snapshotting the numeric features.
    #[inline]
    #[must_use]
    pub fn new(original_text: impl Into<String>, numeric: Vec<f64>, categorical: Vec<String>) -> Self {
        Self {
            original_numeric: numeric.clone(),
            numeric,
            categorical,
            original_text: original_text.into(),
        }
    }

    /// Record with numeric features only and no source text.
    #[inline]
    #[must_use]
    pub fn numeric_only(numeric: Vec<f64>) -> Self {
        Self::new(String::new(), numeric, Vec::new())
    }

    /// Record with categorical features only and no source text.
    #[inline]
    #[must_use]
    pub fn categorical_only<S: Into<String>>(categorical: impl IntoIterator<Item = S>) -> Self {
        Self::new(
            String::new(),
            Vec::new(),
            categorical.into_iter().map(Into::into).collect(),
        )
    }

    #[inline]
    pub fn numeric(&self) -> &[f64] {
        &self.numeric
    }

    #[inline]
    pub fn numeric_at(&self, index: usize) -> f64 {
        self.numeric[index]
    }

    /// Overwrite a working numeric value. The original snapshot is kept.
    #[inline]
    pub fn set_numeric(&mut self, index: usize, value: f64) {
        self.numeric[index] = value;
    }

    #[inline]
    pub fn categorical(&self) -> &[String] {
        &self.categorical
    }

    #[inline]
    pub fn categorical_at(&self, index: usize) -> &str {
        &self.categorical[index]
    }

    /// Numeric features as they were when the record was created.
    #[inline]
    pub fn original_numeric(&self) -> &[f64] {
        &self.original_numeric
    }

    #[inline]
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    #[inline]
    pub fn num_numeric(&self) -> usize {
        self.numeric.len()
    }

    #[inline]
    pub fn num_categorical(&self) -> usize {
        self.categorical.len()
    }

    #[inline]
    pub fn num_features(&self) -> usize {
        self.numeric.len() + self.categorical.len()
    }

    /// Same numeric and categorical counts as `other`.
    #[inline]
    pub fn same_schema(&self, other: &Record) -> bool {
        self.num_numeric() == other.num_numeric()
            && self.num_categorical() == other.num_categorical()
    }
}

/// Records compare by feature values, not by source text or snapshot.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.numeric == other.numeric && self.categorical == other.categorical
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.original_text)
    }
}
