// Weighted merge of the content and collaborative candidate lists

use std::collections::HashSet;
use std::hash::Hash;

/// Number of slots a strategy gets: `floor(total * weight)`.
pub fn weighted_slots(total: usize, weight: f32) -> usize {
    (total as f32 * weight).floor() as usize
}

/// Merge two ranked lists under blend weights.
///
/// Takes the first `floor(limit * weight_a)` items of `list_a` followed by the
/// first `floor(limit * weight_b)` items of `list_b`, removes repeats keeping
/// the first occurrence, and truncates to `limit`. Relative rank within each
/// list is preserved, and `list_a` candidates precede `list_b` candidates.
pub fn weighted_merge<T: Clone + Eq + Hash>(
    list_a: &[T],
    weight_a: f32,
    list_b: &[T],
    weight_b: f32,
    limit: usize,
) -> Vec<T> {
    let take_a = weighted_slots(limit, weight_a);
    let take_b = weighted_slots(limit, weight_b);

    let mut seen: HashSet<&T> = HashSet::new();
    let capacity = limit.min(list_a.len().saturating_add(list_b.len()));
    let mut merged: Vec<T> = Vec::with_capacity(capacity);

    let candidates = list_a.iter().take(take_a).chain(list_b.iter().take(take_b));
    for item in candidates {
        if merged.len() == limit {
            break;
        }
        if seen.insert(item) {
            merged.push(item.clone());
        }
    }

    merged
}
