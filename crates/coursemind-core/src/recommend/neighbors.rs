//! Nearest-neighbor search over interaction matrix rows.
//!
//! The [`NeighborSearch`] trait is the query contract used by the hybrid
//! ranker: the `k` nearest rows by cosine distance, ascending, ties in row
//! order. [`BruteForceIndex`] scans every row, which is adequate for a few
//! thousand users; an approximate index can implement the same trait.

use super::interactions::SparseRow;
use tracing::{debug, instrument};

/// A neighbor returned by a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Row position in the interaction matrix
    pub row: usize,
    /// Cosine distance `1 - cosine_similarity`, in `[0, 2]`
    pub distance: f32,
}

/// k-nearest-neighbor query contract.
pub trait NeighborSearch {
    /// Returns the `k` rows nearest to `query`, sorted ascending by distance
    /// with ties broken by row position. Returns every row if `k` exceeds
    /// the row count.
    fn kneighbors(&self, query: &SparseRow, k: usize) -> Vec<Neighbor>;

    /// Number of indexed rows.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cosine distance between two rows. A zero-norm row has similarity 0 to
/// everything, so its distance is 1.
pub fn cosine_distance(a: &SparseRow, b: &SparseRow) -> f32 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 1.0;
    }
    1.0 - a.dot(b) / denom
}

/// Exhaustive cosine-distance index.
#[derive(Debug, Clone, PartialEq)]
pub struct BruteForceIndex {
    rows: Vec<SparseRow>,
}

impl BruteForceIndex {
    /// Indexes a copy of `rows`.
    pub fn fit(rows: &[SparseRow]) -> Self {
        Self {
            rows: rows.to_vec(),
        }
    }
}

impl NeighborSearch for BruteForceIndex {
    #[instrument(skip_all, fields(k = k, rows = self.rows.len()))]
    fn kneighbors(&self, query: &SparseRow, k: usize) -> Vec<Neighbor> {
        let mut neighbors: Vec<Neighbor> = self
            .rows
            .iter()
            .enumerate()
            .map(|(row, candidate)| Neighbor {
                row,
                distance: cosine_distance(query, candidate),
            })
            .collect();

        // Stable sort keeps row order for equal distances
        neighbors.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        neighbors.truncate(k);

        debug!(returned = neighbors.len(), "Neighbor query complete");
        neighbors
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::interactions::InteractionMatrix;
    use crate::test_utils::interaction;

    fn matrix() -> InteractionMatrix {
        InteractionMatrix::build(&[
            interaction("a", 1, 5.0),
            interaction("a", 2, 3.0),
            interaction("b", 1, 4.0),
            interaction("b", 3, 1.0),
            interaction("c", 1, 5.0),
            interaction("c", 2, 3.0),
            interaction("d", 3, 2.0),
        ])
    }

    #[test]
    fn test_query_row_is_nearest_to_itself() {
        let m = matrix();
        let index = BruteForceIndex::fit(m.rows());
        let result = index.kneighbors(m.row(0).unwrap(), 2);

        // Rows a and c are identical; both at distance 0, row order kept
        assert_eq!(result[0].row, 0);
        assert_eq!(result[1].row, 2);
        assert!(result[0].distance.abs() < 1e-6);
        assert!(result[1].distance.abs() < 1e-6);
    }

    #[test]
    fn test_results_sorted_ascending() {
        let m = matrix();
        let index = BruteForceIndex::fit(m.rows());
        let result = index.kneighbors(m.row(1).unwrap(), 4);
        assert_eq!(result.len(), 4);
        assert!(result.windows(2).all(|w| w[0].distance <= w[1].distance));
        assert_eq!(result[0].row, 1);
    }

    #[test]
    fn test_k_larger_than_rows_returns_all() {
        let m = matrix();
        let index = BruteForceIndex::fit(m.rows());
        assert_eq!(index.kneighbors(m.row(0).unwrap(), 100).len(), 4);
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_orthogonal_rows_at_distance_one() {
        let m = matrix();
        // a rated items 1,2 and d rated only item 3
        let d = cosine_distance(m.row(0).unwrap(), m.row(3).unwrap());
        assert!((d - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_row_distance_is_one() {
        let zero = SparseRow::default();
        let m = matrix();
        assert_eq!(cosine_distance(&zero, m.row(0).unwrap()), 1.0);
        assert_eq!(cosine_distance(&zero, &zero), 1.0);
    }

    #[test]
    fn test_empty_index() {
        let index = BruteForceIndex::fit(&[]);
        assert!(index.is_empty());
        assert!(index.kneighbors(&SparseRow::default(), 3).is_empty());
    }
}
