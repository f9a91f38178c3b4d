//! Production configuration constants.
//!
//! These values define the defaults shared by the library, the CLI and the
//! benchmarks.
//!
//! # Usage
//!
//! ```
//! use coursemind_core::config::{DEFAULT_NUM_RECOMMENDATIONS, DEFAULT_WEIGHT_CB};
//!
//! let n = DEFAULT_NUM_RECOMMENDATIONS;
//! let content_slots = (n as f32 * DEFAULT_WEIGHT_CB).floor() as usize;
//! assert_eq!(content_slots, 2);
//! ```

// =============================================================================
// Preprocessing
// =============================================================================

/// Title assigned to courses whose title is missing or blank.
pub const NO_TITLE_PLACEHOLDER: &str = "No Title Available";

/// Title reported for a collaborative candidate whose item id has no course.
pub const UNKNOWN_COURSE_TITLE: &str = "Unknown Course";

// =============================================================================
// Hybrid Ranker Defaults
// =============================================================================

/// Default number of recommendations returned by the hybrid ranker.
pub const DEFAULT_NUM_RECOMMENDATIONS: usize = 5;

/// Default share of the output drawn from collaborative filtering.
pub const DEFAULT_WEIGHT_CF: f32 = 0.5;

/// Default share of the output drawn from content-based filtering.
pub const DEFAULT_WEIGHT_CB: f32 = 0.5;

// =============================================================================
// Same-Category Matcher
// =============================================================================

/// Maximum number of courses returned by the same-category matcher.
pub const CATEGORY_MATCH_LIMIT: usize = 3;

// =============================================================================
// Moodle Web Service
// =============================================================================

/// REST endpoint path appended to the Moodle base URL.
pub const MOODLE_REST_PATH: &str = "/webservice/rest/server.php";

/// Web service function returning every course on the site.
pub const MOODLE_GET_COURSES_FUNCTION: &str = "core_course_get_courses";

/// Response format requested from the Moodle web service.
pub const MOODLE_RESPONSE_FORMAT: &str = "json";
