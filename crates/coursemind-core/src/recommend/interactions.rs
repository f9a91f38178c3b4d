//! User × item rating matrix.
//!
//! Rows are distinct user ids in sorted order and columns are distinct item
//! ids in sorted order. Ratings are stored sparsely per row, so an absent
//! entry ("no interaction") is distinguishable from a present rating of 0.
//!
//! [`InteractionMatrix::dense_row`] materializes the 0-filled dense view. In
//! that view the two cases are ambiguous: a 0 cell means either no rating or
//! a rating of zero. Cosine distances are unaffected because zero entries
//! contribute nothing to dot products or norms.

use crate::dataset::{Interaction, ItemId, UserId};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, instrument};

/// Ratings of one user as `(column, rating)` pairs sorted by column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseRow {
    entries: Vec<(usize, f32)>,
}

impl SparseRow {
    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, r)| r * r).sum::<f32>().sqrt()
    }

    pub fn dot(&self, other: &SparseRow) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_col, a) = self.entries[i];
            let (b_col, b) = other.entries[j];
            if a_col < b_col {
                i += 1;
            } else if a_col > b_col {
                j += 1;
            } else {
                sum += a * b;
                i += 1;
                j += 1;
            }
        }
        sum
    }
}

/// Pivoted rating matrix built from deduplicated interactions.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionMatrix {
    users: Vec<UserId>,
    items: Vec<ItemId>,
    user_index: BTreeMap<UserId, usize>,
    rows: Vec<SparseRow>,
}

impl InteractionMatrix {
    /// Pivots interactions into the matrix.
    ///
    /// Input is expected to be deduplicated; if a `(user, item)` pair repeats
    /// anyway, the first rating is kept.
    #[instrument(skip_all, fields(interactions = interactions.len()))]
    pub fn build(interactions: &[Interaction]) -> Self {
        let users: Vec<UserId> = interactions
            .iter()
            .map(|i| i.user_id.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let items: Vec<ItemId> = interactions
            .iter()
            .map(|i| i.item_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let user_index: BTreeMap<UserId, usize> = users
            .iter()
            .enumerate()
            .map(|(pos, id)| (id.clone(), pos))
            .collect();
        let item_index: BTreeMap<ItemId, usize> =
            items.iter().enumerate().map(|(pos, id)| (*id, pos)).collect();

        let mut cells: Vec<BTreeMap<usize, f32>> = vec![BTreeMap::new(); users.len()];
        for interaction in interactions {
            let row = user_index[&interaction.user_id];
            let col = item_index[&interaction.item_id];
            cells[row].entry(col).or_insert(interaction.rating);
        }

        let rows = cells
            .into_iter()
            .map(|cols| SparseRow {
                entries: cols.into_iter().collect(),
            })
            .collect();

        info!(
            users = users.len(),
            items = items.len(),
            "Built interaction matrix"
        );
        Self {
            users,
            items,
            user_index,
            rows,
        }
    }

    /// Row position of `user_id`, or None if the user has no interactions.
    pub fn row_index(&self, user_id: &UserId) -> Option<usize> {
        self.user_index.get(user_id).copied()
    }

    /// Item id of column `position`, or None past the last column.
    pub fn column_item(&self, position: usize) -> Option<ItemId> {
        self.items.get(position).copied()
    }

    /// Rating at `(row, col)`; None when the user did not rate the item.
    pub fn rating(&self, row: usize, col: usize) -> Option<f32> {
        let entries = self.rows.get(row)?.entries();
        entries
            .binary_search_by_key(&col, |(c, _)| *c)
            .ok()
            .map(|idx| entries[idx].1)
    }

    pub fn row(&self, position: usize) -> Option<&SparseRow> {
        self.rows.get(position)
    }

    pub fn rows(&self) -> &[SparseRow] {
        &self.rows
    }

    /// Dense 0-filled view of row `position`.
    pub fn dense_row(&self, position: usize) -> Option<Vec<f32>> {
        let row = self.rows.get(position)?;
        let mut dense = vec![0.0; self.items.len()];
        for &(col, rating) in row.entries() {
            dense[col] = rating;
        }
        Some(dense)
    }

    pub fn n_users(&self) -> usize {
        self.users.len()
    }

    pub fn n_items(&self) -> usize {
        self.items.len()
    }
}
