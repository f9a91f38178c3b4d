//! Data preprocessing.
//!
//! Cleans course records and deduplicates interactions. This stage does not
//! fail: every raw record either becomes a clean record or is dropped as a
//! duplicate.

use super::types::{Course, Interaction, ItemId, RawCourse, RawDataset, RawInteraction, UserId};
use crate::config::NO_TITLE_PLACEHOLDER;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Cleaned course table and deduplicated interaction table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanDataset {
    pub courses: Vec<Course>,
    pub interactions: Vec<Interaction>,
}

impl CleanDataset {
    /// Runs both preprocessing passes over a raw dataset.
    pub fn from_raw(raw: RawDataset) -> Self {
        Self {
            courses: clean_courses(raw.courses),
            interactions: dedup_interactions(raw.interactions),
        }
    }
}

/// Cleans course records.
///
/// - Missing or blank titles become [`NO_TITLE_PLACEHOLDER`]
/// - Missing difficulty and certificate fields become empty strings
/// - Courses repeating an earlier `item_id` are dropped (first wins)
#[instrument(skip_all, fields(input = courses.len()))]
pub fn clean_courses(courses: Vec<RawCourse>) -> Vec<Course> {
    let mut seen: HashSet<ItemId> = HashSet::new();
    let input_len = courses.len();

    let cleaned: Vec<Course> = courses
        .into_iter()
        .filter(|c| seen.insert(c.item_id))
        .map(|c| Course {
            item_id: c.item_id,
            title: c
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| NO_TITLE_PLACEHOLDER.to_string()),
            difficulty: c.difficulty.unwrap_or_default(),
            certificate_type: c.certificate_type.unwrap_or_default(),
        })
        .collect();

    debug!(
        kept = cleaned.len(),
        dropped = input_len - cleaned.len(),
        "Cleaned course table"
    );
    cleaned
}

/// Deduplicates interactions on `(user_id, item_id)`.
///
/// The first row encountered in input order wins; later rows for the same
/// pair are dropped even when their rating differs.
#[instrument(skip_all, fields(input = interactions.len()))]
pub fn dedup_interactions(interactions: Vec<RawInteraction>) -> Vec<Interaction> {
    let mut seen: HashSet<(UserId, ItemId)> = HashSet::new();
    let input_len = interactions.len();

    let deduped: Vec<Interaction> = interactions
        .into_iter()
        .filter(|i| seen.insert((i.user_id.clone(), i.item_id)))
        .collect();

    debug!(
        kept = deduped.len(),
        dropped = input_len - deduped.len(),
        "Deduplicated interactions"
    );
    deduped
}
