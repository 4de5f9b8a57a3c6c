use crate::Record;
use std::sync::Arc;

/// An ordered group of shared records.
///
/// Clusters never copy records; they hold `Arc` handles to the dataset's
/// records, so the same record can be referenced while algorithms shuffle
/// clusters around.
#[derive(Debug, Clone, Default)]
pub struct Cluster {
    records: Vec<Arc<Record>>,
}

impl Cluster {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { records: Vec::new() }
    }

    #[inline]
    #[must_use]
    pub fn singleton(record: Arc<Record>) -> Self {
        Self { records: vec![record] }
    }

    #[inline]
    #[must_use]
    pub fn from_records(records: Vec<Arc<Record>>) -> Self {
        Self { records }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Arc<Record>> {
        self.records.get(index)
    }

    #[inline]
    pub fn push(&mut self, record: Arc<Record>) {
        self.records.push(record);
    }

    /// Append every record of `other`, keeping its order.
    pub fn absorb(&mut self, other: Cluster) {
        self.records.extend(other.records);
    }

    /// Whether this exact record handle is a member (identity, not value).
    pub fn contains(&self, record: &Arc<Record>) -> bool {
        self.records.iter().any(|r| Arc::ptr_eq(r, record))
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<Record>> {
        self.records.iter()
    }

    #[inline]
    pub fn records(&self) -> &[Arc<Record>] {
        &self.records
    }

    #[inline]
    pub fn into_records(self) -> Vec<Arc<Record>> {
        self.records
    }
}

impl<'a> IntoIterator for &'a Cluster {
    type Item = &'a Arc<Record>;
    type IntoIter = std::slice::Iter<'a, Arc<Record>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl std::fmt::Display for Cluster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, record) in self.records.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", record)?;
        }
        Ok(())
    }
}
