//! CSV loading for the merged course/interaction table.
//!
//! The merged table carries one row per rating with the course columns
//! repeated on every row:
//!
//! ```text
//! user_id,item_id,rating,course_title,course_difficulty,course_Certificate_type
//! u1,1,5.0,Python Basics,Beginner,None
//! ```
//!
//! Empty course cells are read as missing values. Extra columns are ignored.

use super::types::{ItemId, RawCourse, RawDataset, RawInteraction, UserId};
use crate::error::DatasetError;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{info, instrument};

#[derive(Debug, Deserialize)]
struct MergedRow {
    user_id: String,
    item_id: u64,
    rating: f32,
    course_title: Option<String>,
    course_difficulty: Option<String>,
    #[serde(rename = "course_Certificate_type")]
    course_certificate_type: Option<String>,
}

/// Loads the merged CSV table from a file.
///
/// # Errors
///
/// Returns `DatasetError::Io` if the file cannot be opened and
/// `DatasetError::Csv` for a malformed record.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_merged_csv(path: impl AsRef<Path>) -> Result<RawDataset, DatasetError> {
    let file = std::fs::File::open(path.as_ref())?;
    let dataset = read_merged_csv(file)?;
    info!(
        courses = dataset.courses.len(),
        interactions = dataset.interactions.len(),
        "Loaded dataset"
    );
    Ok(dataset)
}

/// Reads the merged CSV table from any reader.
///
/// Every row yields one raw interaction and one raw course record, so the
/// course table keeps the repetition of the source; preprocessing removes it.
pub fn read_merged_csv<R: Read>(reader: R) -> Result<RawDataset, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::Fields).from_reader(reader);

    let mut dataset = RawDataset::default();
    for record in csv_reader.deserialize::<MergedRow>() {
        let row = record?;
        let item_id = ItemId::from_u64(row.item_id);

        dataset.interactions.push(RawInteraction {
            user_id: UserId::new(row.user_id),
            item_id,
            rating: row.rating,
        });
        dataset.courses.push(RawCourse {
            item_id,
            title: row.course_title,
            difficulty: row.course_difficulty,
            certificate_type: row.course_certificate_type,
        });
    }

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
user_id,item_id,rating,course_title,course_difficulty,course_Certificate_type
u1,1,5.0,Python Basics,Beginner,None
u1,2,3.0,Advanced Python,Advanced,Professional
u2,1,4.0,Python Basics,Beginner,None
u2,3,1.0,,Beginner,
";

    #[test]
    fn test_read_merged_rows() {
        let dataset = read_merged_csv(SAMPLE.as_bytes()).unwrap();

        assert_eq!(dataset.interactions.len(), 4);
        assert_eq!(dataset.courses.len(), 4);
        assert_eq!(dataset.interactions[1].user_id, UserId::from("u1"));
        assert_eq!(dataset.interactions[1].item_id, ItemId::from_u64(2));
        assert_eq!(dataset.interactions[1].rating, 3.0);
        assert_eq!(dataset.courses[1].title.as_deref(), Some("Advanced Python"));
    }

    #[test]
    fn test_empty_cells_are_missing() {
        let dataset = read_merged_csv(SAMPLE.as_bytes()).unwrap();
        let last = &dataset.courses[3];
        assert_eq!(last.title, None);
        assert_eq!(last.certificate_type, None);
        assert_eq!(last.difficulty.as_deref(), Some("Beginner"));
    }

    #[test]
    fn test_malformed_rating_is_reported() {
        let data = "user_id,item_id,rating,course_title,course_difficulty,course_Certificate_type\n\
                    u1,1,not-a-number,Rust,Beginner,None\n";
        let err = read_merged_csv(data.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Csv { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let dataset = load_merged_csv(file.path()).unwrap();
        assert_eq!(dataset.interactions.len(), 4);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_merged_csv("/nonexistent/dataset.csv").unwrap_err();
        assert!(matches!(err, DatasetError::Io(_)));
    }
}
