//! Recommendation strategy selector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The recommendation strategy a front end runs for a request.
///
/// `Hybrid` uses the dataset-backed [`HybridRanker`](crate::recommend::HybridRanker).
/// `Category` uses the catalog-backed
/// [`recommend_same_category`](crate::catalog::recommend_same_category).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Hybrid,
    Category,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Hybrid => "hybrid",
            Strategy::Category => "category",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hybrid" => Ok(Strategy::Hybrid),
            "category" => Ok(Strategy::Category),
            other => Err(format!("Unknown strategy '{other}' (expected hybrid or category)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!("Hybrid".parse::<Strategy>().unwrap(), Strategy::Hybrid);
        assert_eq!(" category ".parse::<Strategy>().unwrap(), Strategy::Category);
        assert!("popular".parse::<Strategy>().is_err());
        assert_eq!(Strategy::Category.to_string(), "category");
    }

    #[test]
    fn test_default_is_hybrid() {
        assert_eq!(Strategy::default(), Strategy::Hybrid);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Strategy::Hybrid).unwrap(), "\"hybrid\"");
        let parsed: Strategy = serde_json::from_str("\"category\"").unwrap();
        assert_eq!(parsed, Strategy::Category);
    }
}
