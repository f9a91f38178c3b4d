//! Course catalog access.
//!
//! The catalog is the list of courses published by the learning platform.
//! It is independent of the recommendation dataset and feeds the
//! same-category matcher.
//!
//! # Providers
//!
//! - [`MoodleCatalog`] - Moodle web service (`core_course_get_courses`), feature `moodle`
//! - [`JsonFileCatalog`] - a JSON file holding the same course array

pub mod category;
#[cfg(feature = "moodle")]
mod moodle;

pub use category::{recommend_same_category, CategoryMatch};
#[cfg(feature = "moodle")]
pub use moodle::{MoodleCatalog, MoodleConfig};

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Course record as published by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCourse {
    pub id: u64,
    pub shortname: String,
    pub fullname: String,
    /// Category id; 0 means uncategorized (the site front page)
    #[serde(default)]
    pub categoryid: u64,
    #[serde(default)]
    pub summary: String,
}

/// Source of the full course catalog.
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetches every course. One request per call; no retries.
    async fn fetch_all_courses(&self) -> Result<Vec<CatalogCourse>, CatalogError>;
}

/// Interprets a catalog response body.
///
/// A JSON object carrying an `exception` key is an error payload; its
/// `message` becomes [`CatalogError::Api`]. Anything else must be an array of
/// course records.
pub fn parse_catalog_response(body: serde_json::Value) -> Result<Vec<CatalogCourse>, CatalogError> {
    if let Some(obj) = body.as_object() {
        if obj.contains_key("exception") {
            let message = obj
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error")
                .to_string();
            error!(%message, "Catalog API error");
            return Err(CatalogError::Api(message));
        }
    }

    let courses: Vec<CatalogCourse> = serde_json::from_value(body)
        .map_err(|e| CatalogError::Other(format!("Unexpected catalog payload: {e}")))?;
    info!(count = courses.len(), "Retrieved courses from catalog");
    Ok(courses)
}

/// Catalog stored as a JSON file.
///
/// The file is read and parsed by [`JsonFileCatalog::open`], so
/// `fetch_all_courses` never touches the filesystem from async code.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
    courses: Vec<CatalogCourse>,
}

impl JsonFileCatalog {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            CatalogError::Other(format!("Failed to read {}: {e}", path.display()))
        })?;
        let body: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| CatalogError::Other(format!("Invalid catalog JSON: {e}")))?;
        let courses = parse_catalog_response(body)?;
        Ok(Self {
            path: path.to_path_buf(),
            courses,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl CatalogProvider for JsonFileCatalog {
    async fn fetch_all_courses(&self) -> Result<Vec<CatalogCourse>, CatalogError> {
        Ok(self.courses.clone())
    }
}
