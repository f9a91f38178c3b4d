//! Course and interaction datasets.
//!
//! - `types`: identifiers and record types (raw and cleaned)
//! - `preprocess`: title filling, text combination and deduplication
//! - `loader`: CSV loading of the merged course/interaction table

pub mod loader;
pub mod preprocess;
pub mod types;

pub use loader::{load_merged_csv, read_merged_csv};
pub use preprocess::{clean_courses, dedup_interactions, CleanDataset};
pub use types::{Course, Interaction, ItemId, RawCourse, RawDataset, RawInteraction, UserId};
