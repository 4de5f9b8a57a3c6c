//! Per-feature distance functions
//!
//! Building blocks used by the record-level metrics in [`crate::metric`].

/// Squared difference between two numeric feature values
#[inline]
pub fn squared_difference(a: f64, b: f64) -> f64 {
    let d = a - b;
    d * d
}

/// Sum of squared differences between two numeric feature vectors
///
/// Both slices are expected to have the same length; extra trailing values
/// in the longer one are ignored.
#[inline]
pub fn squared_euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| squared_difference(*x, *y))
        .sum()
}

/// Levenshtein edit distance between two strings
///
/// Counts the minimum number of single-character insertions, deletions and
/// substitutions needed to turn `a` into `b`. Characters are Unicode scalar
/// values and comparison is case-sensitive.
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_euclidean() {
        assert_eq!(squared_euclidean(&[2.0, 5.0], &[5.0, 10.0]), 34.0);
        assert_eq!(squared_euclidean(&[], &[]), 0.0);
    }

    #[test]
    fn test_edit_distance_substitutions() {
        assert_eq!(edit_distance("MIT", "NUC"), 3);
        assert_eq!(edit_distance("MIT", "NIV"), 2);
        assert_eq!(edit_distance("MIT", "MIT"), 0);
    }

    #[test]
    fn test_edit_distance_insert_delete() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("flaw", "lawn"), 2);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
    }

    #[test]
    fn test_edit_distance_is_case_sensitive() {
        assert_eq!(edit_distance("mit", "MIT"), 3);
    }

    #[test]
    fn test_edit_distance_counts_chars_not_bytes() {
        assert_eq!(edit_distance("café", "cafe"), 1);
        assert_eq!(edit_distance("日本", "日本語"), 1);
    }

    #[test]
    fn test_edit_distance_is_symmetric() {
        for (a, b) in [("ME1", "ME3"), ("CYT", "ERL"), ("POX", ""), ("EXC", "VAC")] {
            assert_eq!(edit_distance(a, b), edit_distance(b, a));
        }
        assert_eq!(edit_distance("ME1", "ME3"), 1);
    }
}
