//! Etymology and definition records supplied by the enrichment service.

use serde::{Deserialize, Serialize};

/// Origin used when no etymology could be obtained.
pub const UNKNOWN_ORIGIN: &str = "unknown";

/// Meaning assigned to a root when nothing better is known.
pub const PLACEHOLDER_MEANING: &str = "base meaning";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Etymology {
    pub origin: String,
    /// Meaning of the historical root
    pub root: String,
    #[serde(default)]
    pub development: String,
    #[serde(default)]
    pub related: Vec<String>,
    #[serde(default)]
    pub morphemes: Vec<String>,
    /// Historical periods or attested forms
    #[serde(default)]
    pub periods: Vec<String>,
}

impl Etymology {
    pub fn fallback() -> Self {
        Self {
            origin: UNKNOWN_ORIGIN.to_string(),
            root: PLACEHOLDER_MEANING.to_string(),
            development: String::new(),
            related: Vec::new(),
            morphemes: Vec::new(),
            periods: Vec::new(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == UNKNOWN_ORIGIN && self.related.is_empty() && self.periods.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub primary: String,
    #[serde(default)]
    pub secondary: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}

impl Definition {
    /// Placeholder definition for a word the service could not describe.
    pub fn placeholder(word: &str) -> Self {
        Self {
            primary: format!("definition of '{}' pending", word),
            secondary: Vec::new(),
            technical: None,
            part_of_speech: None,
            examples: Vec::new(),
        }
    }
}
