//! Hybrid recommendation: content-based + collaborative filtering.
//!
//! [`HybridRanker`] borrows a [`RecommendationModel`] and answers queries
//! of the form "courses for this user, who liked this course":
//!
//! 1. Resolve the liked course by title (trimmed, case-insensitive)
//! 2. Rank other courses by text similarity to it
//! 3. Resolve the user's rating row
//! 4. Find the nearest users by rating pattern and map them to course titles
//! 5. Blend both lists under the configured weights


use super::merge::weighted_merge;
use super::model::RecommendationModel;
use crate::config::{
    DEFAULT_NUM_RECOMMENDATIONS, DEFAULT_WEIGHT_CB, DEFAULT_WEIGHT_CF, UNKNOWN_COURSE_TITLE,
};
use crate::dataset::UserId;
use crate::error::RecommendError;
use tracing::{debug, instrument, warn};

/// Query parameters for [`HybridRanker::recommend`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecommendOptions {
    /// Maximum number of titles returned
    pub num_recommendations: usize,
    /// Share of output slots for collaborative candidates
    pub weight_cf: f32,
    /// Share of output slots for content candidates
    pub weight_cb: f32,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            num_recommendations: DEFAULT_NUM_RECOMMENDATIONS,
            weight_cf: DEFAULT_WEIGHT_CF,
            weight_cb: DEFAULT_WEIGHT_CB,
        }
    }
}

impl RecommendOptions {
    /// Checks that both weights are finite and non-negative.
    pub fn validate(&self) -> Result<(), RecommendError> {
        for (name, value) in [("weight_cf", self.weight_cf), ("weight_cb", self.weight_cb)] {
            if !value.is_finite() || value < 0.0 {
                return Err(RecommendError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}

/// Query-time orchestration over a built model.
#[derive(Debug, Clone, Copy)]
pub struct HybridRanker<'a> {
    model: &'a RecommendationModel,
}

impl<'a> HybridRanker<'a> {
    pub fn new(model: &'a RecommendationModel) -> Self {
        Self { model }
    }

    /// Recommends up to `options.num_recommendations` course titles.
    ///
    /// # Errors
    ///
    /// - `CourseNotFound` if no course title matches `liked_course_title`
    /// - `UserNotFound` if `user_id` has no interactions
    /// - `InvalidWeight` if a weight is negative or not finite
    #[instrument(skip(self), fields(user = %user_id))]
    pub fn recommend(
        &self,
        user_id: &UserId,
        liked_course_title: &str,
        options: RecommendOptions,
    ) -> Result<Vec<String>, RecommendError> {
        options.validate()?;
        let n = options.num_recommendations;

        let content = self.content_recommendations(liked_course_title, n)?;
        let collaborative = self.collaborative_recommendations(user_id, n)?;

        let merged = weighted_merge(
            &content,
            options.weight_cb,
            &collaborative,
            options.weight_cf,
            n,
        );
        debug!(
            content = content.len(),
            collaborative = collaborative.len(),
            merged = merged.len(),
            "Merged recommendations"
        );
        Ok(merged)
    }

    /// Up to `n` titles most similar in text to the liked course, most
    /// similar first, never including the liked course itself.
    pub fn content_recommendations(
        &self,
        liked_course_title: &str,
        n: usize,
    ) -> Result<Vec<String>, RecommendError> {
        let idx = self
            .model
            .find_course(liked_course_title)
            .ok_or(RecommendError::CourseNotFound)?;

        let courses = self.model.courses();
        Ok(self
            .model
            .similarity()
            .ranked_row(idx)
            .into_iter()
            .take(n)
            .map(|(pos, _)| courses[pos].title.clone())
            .collect())
    }

    /// Up to `n` titles derived from the user's nearest neighbors, in
    /// neighbor distance order.
    ///
    /// Asks for `n + 1` neighbors and drops the first (the user itself).
    /// Each remaining neighbor's row position is read as a column of the
    /// interaction matrix; positions past the last column are skipped, and
    /// item ids without a course become [`UNKNOWN_COURSE_TITLE`].
    pub fn collaborative_recommendations(
        &self,
        user_id: &UserId,
        n: usize,
    ) -> Result<Vec<String>, RecommendError> {
        let matrix = self.model.interaction_matrix();
        let row = matrix
            .row_index(user_id)
            .and_then(|pos| matrix.row(pos))
            .ok_or_else(|| RecommendError::UserNotFound {
                user_id: user_id.to_string(),
            })?;

        let neighbors = self.model.neighbor_index().kneighbors(row, n.saturating_add(1));

        let mut titles = Vec::with_capacity(n.min(neighbors.len()));
        for neighbor in neighbors.iter().skip(1) {
            let Some(item_id) = matrix.column_item(neighbor.row) else {
                warn!(
                    position = neighbor.row,
                    columns = matrix.n_items(),
                    "Neighbor position outside item columns, skipping"
                );
                continue;
            };
            let title = self
                .model
                .course_by_item(item_id)
                .map(|c| c.title.clone())
                .unwrap_or_else(|| UNKNOWN_COURSE_TITLE.to_string());
            titles.push(title);
        }
        Ok(titles)
    }
}
