//! Same-category course matcher.
//!
//! Finds the liked course in the catalog by short name, full name or id and
//! returns other courses from its category. When the course is
//! uncategorized, or alone in its category, every other course qualifies.

use super::CatalogCourse;
use crate::error::RecommendError;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// A course suggested by the matcher.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMatch {
    pub id: u64,
    pub name: String,
    pub shortname: String,
    pub summary: String,
}

impl From<&CatalogCourse> for CategoryMatch {
    fn from(course: &CatalogCourse) -> Self {
        Self {
            id: course.id,
            name: course.fullname.clone(),
            shortname: course.shortname.clone(),
            summary: course.summary.clone(),
        }
    }
}

/// Recommends up to `limit` catalog courses sharing the liked course's
/// category, in catalog order.
///
/// `liked_course` is trimmed and matched case-insensitively against short
/// and full names, or exactly against the decimal course id. The first
/// matching course wins.
///
/// # Errors
///
/// Returns `RecommendError::CourseNotFound` if nothing matches.
#[instrument(skip(catalog), fields(catalog = catalog.len()))]
pub fn recommend_same_category(
    catalog: &[CatalogCourse],
    liked_course: &str,
    limit: usize,
) -> Result<Vec<CategoryMatch>, RecommendError> {
    let needle = liked_course.trim().to_lowercase();

    let liked = catalog
        .iter()
        .find(|c| {
            c.shortname.to_lowercase() == needle
                || c.fullname.to_lowercase() == needle
                || c.id.to_string() == needle
        })
        .ok_or(RecommendError::CourseNotFound)?;
    debug!(id = liked.id, category = liked.categoryid, "Matched liked course");

    let others = || catalog.iter().filter(|c| c.id != liked.id);

    let mut matches: Vec<CategoryMatch> = if liked.categoryid != 0 {
        others()
            .filter(|c| c.categoryid == liked.categoryid)
            .map(CategoryMatch::from)
            .collect()
    } else {
        Vec::new()
    };

    if matches.is_empty() {
        info!("No courses share the category, recommending from all categories");
        matches = others().map(CategoryMatch::from).collect();
    }

    matches.truncate(limit);
    Ok(matches)
}
