//! Test utilities for coursemind-core.
//!
//! Small synthetic datasets shared by unit tests. Only compiled when running
//! tests.

use crate::dataset::{CleanDataset, ItemId, RawCourse, RawDataset, RawInteraction, UserId};
use crate::recommend::RecommendationModel;

pub fn raw_course(id: u64, title: &str, difficulty: &str, certificate: &str) -> RawCourse {
    RawCourse {
        item_id: ItemId::from_u64(id),
        title: Some(title.to_string()),
        difficulty: Some(difficulty.to_string()),
        certificate_type: Some(certificate.to_string()),
    }
}

pub fn interaction(user: &str, item: u64, rating: f32) -> RawInteraction {
    RawInteraction {
        user_id: UserId::from(user),
        item_id: ItemId::from_u64(item),
        rating,
    }
}

/// Three courses and four ratings:
///
/// | id | title           | difficulty | certificate  |
/// |----|-----------------|------------|--------------|
/// | 1  | Python Basics   | Beginner   | None         |
/// | 2  | Advanced Python | Advanced   | Professional |
/// | 3  | Cooking 101     | Beginner   | None         |
///
/// u1 rates 1 → 5.0 and 2 → 3.0; u2 rates 1 → 4.0 and 3 → 1.0.
pub fn scenario_dataset() -> RawDataset {
    RawDataset {
        courses: vec![
            raw_course(1, "Python Basics", "Beginner", "None"),
            raw_course(2, "Advanced Python", "Advanced", "Professional"),
            raw_course(3, "Cooking 101", "Beginner", "None"),
        ],
        interactions: vec![
            interaction("u1", 1, 5.0),
            interaction("u1", 2, 3.0),
            interaction("u2", 1, 4.0),
            interaction("u2", 3, 1.0),
        ],
    }
}

pub fn scenario_model() -> RecommendationModel {
    RecommendationModel::from_raw(scenario_dataset())
}

/// Builds a model from already-clean parts, bypassing preprocessing.
pub fn model_from(courses: Vec<RawCourse>, interactions: Vec<RawInteraction>) -> RecommendationModel {
    RecommendationModel::build(CleanDataset::from_raw(RawDataset {
        courses,
        interactions,
    }))
}
