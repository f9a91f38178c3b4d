use serde::{Deserialize, Serialize};
use std::fmt;

/// Course identifier, as assigned by the learning platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Creates an ItemId from a raw u64 value.
    pub fn from_u64(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw u64 value of this ID.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User identifier. Ordered lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Course record as it arrives from the data source.
///
/// Any textual field may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCourse {
    pub item_id: ItemId,
    pub title: Option<String>,
    pub difficulty: Option<String>,
    pub certificate_type: Option<String>,
}

/// Cleaned course record.
///
/// `title` is never empty after preprocessing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub item_id: ItemId,
    pub title: String,
    pub difficulty: String,
    pub certificate_type: String,
}

impl Course {
    /// Text used for vectorization: title, difficulty and certificate type
    /// joined by single spaces.
    pub fn combined_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title, self.difficulty, self.certificate_type
        )
    }
}

/// Rating interaction as it arrives from the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInteraction {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub rating: f32,
}

/// Deduplicated interaction: at most one per `(user_id, item_id)`.
pub type Interaction = RawInteraction;

/// Raw course and interaction tables, before preprocessing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDataset {
    pub courses: Vec<RawCourse>,
    pub interactions: Vec<RawInteraction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_text_uses_single_spaces() {
        let course = Course {
            item_id: ItemId::from_u64(1),
            title: "Python Basics".to_string(),
            difficulty: "Beginner".to_string(),
            certificate_type: "None".to_string(),
        };
        assert_eq!(course.combined_text(), "Python Basics Beginner None");
    }

    #[test]
    fn test_combined_text_keeps_empty_fields() {
        let course = Course {
            item_id: ItemId::from_u64(1),
            title: "Rust".to_string(),
            difficulty: String::new(),
            certificate_type: String::new(),
        };
        assert_eq!(course.combined_text(), "Rust  ");
    }

    #[test]
    fn test_user_ids_order_lexicographically() {
        let mut ids = vec![UserId::from("u2"), UserId::from("u10"), UserId::from("u1")];
        ids.sort();
        let ordered: Vec<&str> = ids.iter().map(UserId::as_str).collect();
        assert_eq!(ordered, vec!["u1", "u10", "u2"]);
    }
}
