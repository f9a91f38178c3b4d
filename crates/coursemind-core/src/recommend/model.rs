//! The immutable recommendation model.
//!
//! All structures are built once from the full cleaned dataset and never
//! mutated afterwards. A changed dataset requires building a new model.
//! Because nothing mutates after [`RecommendationModel::build`], the model
//! can be shared across threads (`Arc<RecommendationModel>`) without locks.

use super::interactions::InteractionMatrix;
use super::neighbors::{BruteForceIndex, NeighborSearch};
use super::similarity::CourseSimilarityMatrix;
use super::vectorize::TfidfVectorizer;
use crate::dataset::{CleanDataset, Course, Interaction, ItemId, RawDataset};
use std::collections::HashMap;
use tracing::{info, instrument};

/// Normalizes a course title for lookup: trimmed and lowercased.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Precomputed state consulted by the hybrid ranker.
#[derive(Debug, Clone)]
pub struct RecommendationModel {
    courses: Vec<Course>,
    interactions: Vec<Interaction>,
    vectorizer: TfidfVectorizer,
    similarity: CourseSimilarityMatrix,
    matrix: InteractionMatrix,
    neighbors: BruteForceIndex,
    /// Normalized title → first course position with that title
    title_index: HashMap<String, usize>,
    /// Item id → course position
    item_index: HashMap<ItemId, usize>,
}

impl RecommendationModel {
    /// Builds every structure from a cleaned dataset.
    #[instrument(skip_all, fields(courses = dataset.courses.len(), interactions = dataset.interactions.len()))]
    pub fn build(dataset: CleanDataset) -> Self {
        let CleanDataset {
            courses,
            interactions,
        } = dataset;

        let texts: Vec<String> = courses.iter().map(Course::combined_text).collect();
        let (vectorizer, vectors) = TfidfVectorizer::fit_transform(&texts);
        let similarity = CourseSimilarityMatrix::build(&vectors);

        let matrix = InteractionMatrix::build(&interactions);
        let neighbors = BruteForceIndex::fit(matrix.rows());

        let mut title_index = HashMap::new();
        let mut item_index = HashMap::new();
        for (pos, course) in courses.iter().enumerate() {
            title_index.entry(normalize_title(&course.title)).or_insert(pos);
            item_index.entry(course.item_id).or_insert(pos);
        }

        info!(
            courses = courses.len(),
            users = matrix.n_users(),
            items = matrix.n_items(),
            vocabulary = vectorizer.vocabulary_len(),
            "Recommendation model ready"
        );

        Self {
            courses,
            interactions,
            vectorizer,
            similarity,
            matrix,
            neighbors,
            title_index,
            item_index,
        }
    }

    /// Preprocesses a raw dataset and builds the model.
    pub fn from_raw(raw: RawDataset) -> Self {
        Self::build(CleanDataset::from_raw(raw))
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn similarity(&self) -> &CourseSimilarityMatrix {
        &self.similarity
    }

    pub fn interaction_matrix(&self) -> &InteractionMatrix {
        &self.matrix
    }

    pub fn neighbor_index(&self) -> &dyn NeighborSearch {
        &self.neighbors
    }

    /// Position of the first course whose title matches `title` after
    /// trimming and lowercasing both sides.
    pub fn find_course(&self, title: &str) -> Option<usize> {
        self.title_index.get(&normalize_title(title)).copied()
    }

    /// Course carrying `item_id`, if any.
    pub fn course_by_item(&self, item_id: ItemId) -> Option<&Course> {
        self.item_index.get(&item_id).map(|&pos| &self.courses[pos])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::scenario_model;

    #[test]
    fn test_build_sizes() {
        let model = scenario_model();
        assert_eq!(model.courses().len(), 3);
        assert_eq!(model.similarity().len(), 3);
        assert_eq!(model.interaction_matrix().n_users(), 2);
        assert_eq!(model.neighbor_index().len(), 2);
    }

    #[test]
    fn test_vectorizer_matches_similarity_space() {
        let model = scenario_model();
        let vectorizer = model.vectorizer();
        assert!(vectorizer.term_index("python").is_some());
        assert!(vectorizer.term_index("none").is_none());

        let courses = model.courses();
        let basics = vectorizer.transform(&courses[0].combined_text());
        let cooking = vectorizer.transform(&courses[2].combined_text());
        let expected = model.similarity().get(0, 2).unwrap();
        assert!((basics.cosine(&cooking) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_find_course_ignores_case_and_spacing() {
        let model = scenario_model();
        assert_eq!(model.find_course("Python Basics"), Some(0));
        assert_eq!(model.find_course("  python basics "), Some(0));
        assert_eq!(model.find_course("ADVANCED PYTHON"), Some(1));
        assert_eq!(model.find_course("nonexistent course"), None);
    }

    #[test]
    fn test_every_course_title_resolves() {
        let model = scenario_model();
        for course in model.courses() {
            let pos = model.find_course(&course.title).unwrap();
            assert_eq!(normalize_title(&model.courses()[pos].title), normalize_title(&course.title));
        }
    }

    #[test]
    fn test_course_by_item() {
        let model = scenario_model();
        let course = model.course_by_item(ItemId::from_u64(3)).unwrap();
        assert_eq!(course.title, "Cooking 101");
        assert!(model.course_by_item(ItemId::from_u64(99)).is_none());
    }
}
