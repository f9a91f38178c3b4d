//! Error types for coursemind-core.
//!
//! This module defines the errors surfaced by dataset loading, the hybrid
//! ranker and the course catalog providers.

use thiserror::Error;

/// Errors that can occur while loading a dataset from disk.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Failed to open or read the dataset file
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    /// A CSV record could not be parsed
    #[error("Malformed dataset record{}: {message}", line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    Csv {
        /// Line number of the offending record, when known
        line: Option<u64>,
        /// Parser message
        message: String,
    },
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        DatasetError::Csv {
            line,
            message: err.to_string(),
        }
    }
}

/// Errors returned by a recommendation strategy.
///
/// The messages of `CourseNotFound` and `UserNotFound` are the exact strings
/// reported to end users.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendError {
    /// The liked course title is not in the course table
    #[error("Course not found in dataset")]
    CourseNotFound,
    /// The user has no row in the interaction matrix
    #[error("User {user_id} not found in dataset")]
    UserNotFound {
        /// The user id as supplied by the caller
        user_id: String,
    },
    /// A blend weight is negative or not finite
    #[error("Invalid weight {name}: {value} (must be finite and non-negative)")]
    InvalidWeight {
        /// Weight parameter name
        name: &'static str,
        /// Value supplied
        value: f32,
    },
    /// The request payload could not be interpreted
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
}

impl RecommendError {
    /// Renders the error as a one-element message sequence.
    ///
    /// Front ends that print recommendations line by line use this to show
    /// failures in the same shape as a result list.
    pub fn to_messages(&self) -> Vec<String> {
        vec![self.to_string()]
    }
}

/// Errors that can occur while fetching the course catalog.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// The server answered with a non-success HTTP status
    #[error("HTTP Error: {0}")]
    Http(String),
    /// The server could not be reached
    #[error("Connection Error: {0}")]
    Connection(String),
    /// The request did not complete in time
    #[error("Timeout Error: {0}")]
    Timeout(String),
    /// The web service answered with an exception payload
    #[error("Catalog API error: {0}")]
    Api(String),
    /// Any other failure (decoding, file access, request construction)
    #[error("Catalog error: {0}")]
    Other(String),
}
