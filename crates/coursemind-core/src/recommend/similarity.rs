//! Precomputed pairwise course similarity.

use super::vectorize::SparseVector;
use tracing::{info, instrument};

/// Symmetric N×N cosine similarity matrix over the course table.
///
/// Rows are positional: row `i` belongs to the course at position `i` of
/// the cleaned course table. The diagonal is always 1, including courses
/// whose text vector is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseSimilarityMatrix {
    n: usize,
    /// Row-major scores
    scores: Vec<f32>,
}

impl CourseSimilarityMatrix {
    /// Computes all pairwise cosine similarities.
    ///
    /// Only the upper triangle is computed; the lower triangle is mirrored so
    /// the matrix is exactly symmetric.
    #[instrument(skip_all, fields(courses = vectors.len()))]
    pub fn build(vectors: &[SparseVector]) -> Self {
        let n = vectors.len();
        let mut scores = vec![0.0f32; n * n];

        for i in 0..n {
            scores[i * n + i] = 1.0;
            for j in (i + 1)..n {
                let sim = vectors[i].cosine(&vectors[j]);
                scores[i * n + j] = sim;
                scores[j * n + i] = sim;
            }
        }

        info!(courses = n, "Built course similarity matrix");
        Self { n, scores }
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Similarity between courses `i` and `j`, or None if out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        (i < self.n && j < self.n).then(|| self.scores[i * self.n + j])
    }

    /// Row `i` of the matrix, or None if out of range.
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        (i < self.n).then(|| &self.scores[i * self.n..(i + 1) * self.n])
    }

    /// `(position, score)` pairs of row `i`, sorted by score descending with
    /// ties in position order, excluding position `i` itself.
    pub fn ranked_row(&self, i: usize) -> Vec<(usize, f32)> {
        let Some(row) = self.row(i) else {
            return Vec::new();
        };

        let mut ranked: Vec<(usize, f32)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|(pos, _)| *pos != i)
            .collect();
        // Stable sort keeps position order for equal scores
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::vectorize::TfidfVectorizer;
    use proptest::prelude::*;

    fn matrix_for(docs: &[&str]) -> CourseSimilarityMatrix {
        let (_, vectors) = TfidfVectorizer::fit_transform(docs);
        CourseSimilarityMatrix::build(&vectors)
    }

    #[test]
    fn test_unit_diagonal_and_symmetry() {
        let m = matrix_for(&["python basics", "advanced python", "cooking", "the of"]);
        for i in 0..m.len() {
            assert_eq!(m.get(i, i), Some(1.0));
            for j in 0..m.len() {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
    }

    #[test]
    fn test_ranked_row_excludes_self() {
        let m = matrix_for(&["python basics", "python basics", "cooking"]);
        let ranked = m.ranked_row(0);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|(pos, _)| *pos != 0));
        // The identical course ranks first
        assert_eq!(ranked[0].0, 1);
        assert!((ranked[0].1 - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_ranked_row_ties_keep_position_order() {
        let m = matrix_for(&["rust", "cooking", "gardening", "painting"]);
        let positions: Vec<usize> = m.ranked_row(0).into_iter().map(|(p, _)| p).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn test_out_of_range_lookups() {
        let m = matrix_for(&["rust"]);
        assert_eq!(m.get(0, 1), None);
        assert!(m.row(1).is_none());
        assert!(m.ranked_row(5).is_empty());
    }

    #[test]
    fn test_rebuild_is_identical() {
        let docs = ["python basics beginner", "advanced python", "cooking 101 beginner"];
        assert_eq!(matrix_for(&docs), matrix_for(&docs));
    }

    proptest! {
        #[test]
        fn prop_symmetric_with_unit_diagonal(docs in prop::collection::vec("[a-e ]{0,12}", 0..8)) {
            let refs: Vec<&str> = docs.iter().map(String::as_str).collect();
            let m = matrix_for(&refs);
            for i in 0..m.len() {
                prop_assert_eq!(m.get(i, i), Some(1.0));
                for j in 0..m.len() {
                    prop_assert_eq!(m.get(i, j), m.get(j, i));
                }
            }
        }
    }
}
