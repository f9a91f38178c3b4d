//! End-to-end tests: merged CSV on disk → model → hybrid recommendations.

use coursemind_core::catalog::{recommend_same_category, CatalogProvider, JsonFileCatalog};
use coursemind_core::dataset::{load_merged_csv, UserId};
use coursemind_core::error::RecommendError;
use coursemind_core::recommend::{HybridRanker, RecommendOptions, RecommendationModel};
use std::io::Write;
use tempfile::NamedTempFile;

const MERGED_CSV: &str = "\
user_id,item_id,rating,course_title,course_difficulty,course_Certificate_type
u1,1,5.0,Python Basics,Beginner,None
u1,2,3.0,Advanced Python,Advanced,Professional
u2,1,4.0,Python Basics,Beginner,None
u2,3,1.0,Cooking 101,Beginner,None
";

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn load_model(content: &str) -> RecommendationModel {
    let file = write_csv(content);
    RecommendationModel::from_raw(load_merged_csv(file.path()).unwrap())
}

fn options(n: usize) -> RecommendOptions {
    RecommendOptions {
        num_recommendations: n,
        ..RecommendOptions::default()
    }
}

#[test]
fn test_csv_to_recommendations() {
    let model = load_model(MERGED_CSV);
    assert_eq!(model.courses().len(), 3);
    assert_eq!(model.interaction_matrix().n_users(), 2);
    assert_eq!(model.interaction_matrix().n_items(), 3);

    let titles = HybridRanker::new(&model)
        .recommend(&UserId::from("u1"), "python basics", options(2))
        .unwrap();

    assert_eq!(titles.len(), 2);
    assert!(!titles.contains(&"Python Basics".to_string()));
    assert!(titles.contains(&"Advanced Python".to_string()));
    assert!(titles.contains(&"Cooking 101".to_string()));
}

#[test]
fn test_unknown_user() {
    let model = load_model(MERGED_CSV);
    let err = HybridRanker::new(&model)
        .recommend(&UserId::from("ghost"), "Python Basics", options(2))
        .unwrap_err();
    assert_eq!(err.to_messages(), vec!["User ghost not found in dataset"]);
}

#[test]
fn test_unknown_course() {
    let model = load_model(MERGED_CSV);
    let err = HybridRanker::new(&model)
        .recommend(&UserId::from("u1"), "Nonexistent", options(2))
        .unwrap_err();
    assert_eq!(err, RecommendError::CourseNotFound);
    assert_eq!(err.to_messages(), vec!["Course not found in dataset"]);
}

#[test]
fn test_rebuild_is_deterministic() {
    let first = load_model(MERGED_CSV);
    let second = load_model(MERGED_CSV);

    for user in ["u1", "u2"] {
        for title in ["Python Basics", "Advanced Python", "Cooking 101"] {
            let a = HybridRanker::new(&first)
                .recommend(&UserId::from(user), title, options(3))
                .unwrap();
            let b = HybridRanker::new(&second)
                .recommend(&UserId::from(user), title, options(3))
                .unwrap();
            assert_eq!(a, b, "user {user}, title {title}");
        }
    }
}

#[test]
fn test_duplicate_rows_are_collapsed() {
    let csv = format!("{MERGED_CSV}u1,1,1.0,Python Basics,Beginner,None\n");
    let model = load_model(&csv);

    assert_eq!(model.interactions().len(), 4);
    let matrix = model.interaction_matrix();
    let row = matrix.row_index(&UserId::from("u1")).unwrap();
    assert_eq!(matrix.rating(row, 0), Some(5.0));
}

#[test]
fn test_missing_title_gets_placeholder() {
    let csv = format!("{MERGED_CSV}u3,4,2.0,,Beginner,\n");
    let model = load_model(&csv);
    assert!(model.find_course("No Title Available").is_some());
}

#[tokio::test]
async fn test_catalog_file_to_category_matches() {
    let catalog_json = r#"[
        {"id": 1, "shortname": "site", "fullname": "Learning Portal", "categoryid": 0, "summary": ""},
        {"id": 2, "shortname": "py101", "fullname": "Python Basics", "categoryid": 4, "summary": "Intro"},
        {"id": 3, "shortname": "py201", "fullname": "Advanced Python", "categoryid": 4, "summary": "Deeper"},
        {"id": 4, "shortname": "cook", "fullname": "Cooking 101", "categoryid": 7, "summary": "Food"}
    ]"#;
    let file = write_csv(catalog_json);

    let courses = JsonFileCatalog::open(file.path())
        .unwrap()
        .fetch_all_courses()
        .await
        .unwrap();
    let matches = recommend_same_category(&courses, "python basics", 3).unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].name, "Advanced Python");
}
