use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gloss::{Definition, Etymology};

/// Position of a morpheme within its word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MorphemeKind {
    Prefix,
    Root,
    Suffix,
}

impl MorphemeKind {
    /// Semantic weight used by the default style when averaging across a word.
    pub fn weight(self) -> f64 {
        match self {
            MorphemeKind::Root => 1.0,
            MorphemeKind::Prefix => 0.6,
            MorphemeKind::Suffix => 0.4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MorphemeKind::Prefix => "prefix",
            MorphemeKind::Root => "root",
            MorphemeKind::Suffix => "suffix",
        }
    }
}

impl std::fmt::Display for MorphemeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognized prefix, root, or suffix segment.
///
/// `start` and `end` are char offsets into the normalized source word, so
/// `word.chars().skip(start).take(end - start)` yields `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Morpheme {
    #[serde(rename = "type")]
    pub kind: MorphemeKind,
    pub value: String,
    pub meaning: String,
    pub start: usize,
    pub end: usize,
}

impl Morpheme {
    pub fn new(kind: MorphemeKind, value: &str, meaning: &str, start: usize) -> Self {
        Self {
            kind,
            value: value.to_string(),
            meaning: meaning.to_string(),
            start,
            end: start + value.chars().count(),
        }
    }

    /// Check whether a char offset falls inside this morpheme.
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Coarse phonetic class of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Vowel,
    Consonant,
    Other,
}

impl CharClass {
    pub fn of(c: char) -> Self {
        let lower = c.to_ascii_lowercase();
        if matches!(lower, 'a' | 'e' | 'i' | 'o' | 'u') {
            CharClass::Vowel
        } else if lower.is_ascii_alphabetic() {
            CharClass::Consonant
        } else {
            CharClass::Other
        }
    }

    /// Pattern letter: `V`, `C` or `X`.
    pub fn symbol(self) -> char {
        match self {
            CharClass::Vowel => 'V',
            CharClass::Consonant => 'C',
            CharClass::Other => 'X',
        }
    }
}

/// Stress level assigned to one syllable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stress {
    Primary,
    Secondary,
    Unstressed,
}

/// Vowel/consonant layout of a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneticStructure {
    /// One of `C`, `V`, `X` per character
    pub pattern: String,
    pub syllable_count: usize,
    pub stress_pattern: Vec<Stress>,
}

/// Coarse usage-frequency bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyClass {
    High,
    Medium,
    Low,
}

impl FrequencyClass {
    pub fn as_str(self) -> &'static str {
        match self {
            FrequencyClass::High => "high",
            FrequencyClass::Medium => "medium",
            FrequencyClass::Low => "low",
        }
    }
}

impl std::fmt::Display for FrequencyClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One source word and everything derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    pub source: String,
    pub constructed: String,
    pub pronunciation: String,
    pub morphemes: Vec<Morpheme>,
    pub phonetic_structure: PhoneticStructure,
    /// Diagnostic identifiers describing which rules changed which positions
    pub applied_rules: Vec<String>,
    pub part_of_speech: String,
    pub frequency_class: FrequencyClass,
    pub definition: Definition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etymology: Option<Etymology>,
    pub created_at: DateTime<Utc>,
}

impl WordEntry {
    /// The root morpheme, if the decomposition recorded one.
    pub fn root(&self) -> Option<&Morpheme> {
        self.morphemes.iter().find(|m| m.kind == MorphemeKind::Root)
    }
}
