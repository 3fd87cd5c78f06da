//! The vocabulary accumulator and the artifacts derived from it.

pub mod store;
pub mod tables;

use lexiforge_common::WordEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use store::LexiconStore;
pub use tables::{LexiconMetadata, LookupTables};

/// Result of adding a word to the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The source word was already present; the vocabulary is unchanged
    Skipped,
}

/// Source word → entry. The only owner of `WordEntry` values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vocabulary {
    entries: BTreeMap<String, WordEntry>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, source: &str) -> bool {
        self.entries.contains_key(source)
    }

    pub fn get(&self, source: &str) -> Option<&WordEntry> {
        self.entries.get(source)
    }

    /// Insert a new entry. A second add for the same source word is a no-op.
    pub fn insert(&mut self, entry: WordEntry) -> AddOutcome {
        if self.entries.contains_key(&entry.source) {
            return AddOutcome::Skipped;
        }
        self.entries.insert(entry.source.clone(), entry);
        AddOutcome::Added
    }

    pub fn entries(&self) -> impl Iterator<Item = &WordEntry> {
        self.entries.values()
    }

    /// All entries whose constructed form equals `constructed`.
    pub fn find_constructed(&self, constructed: &str) -> Vec<&WordEntry> {
        self.entries
            .values()
            .filter(|e| e.constructed == constructed)
            .collect()
    }

    /// Rewrite free text word by word into the constructed language.
    ///
    /// Tokens are matched case-insensitively with surrounding punctuation
    /// ignored; unknown tokens are kept as written.
    pub fn translate_text(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|token| {
                let word = token
                    .trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase();
                match self.entries.get(&word) {
                    Some(entry) => token.to_lowercase().replacen(&word, &entry.constructed, 1),
                    None => token.to_string(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl FromIterator<WordEntry> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = WordEntry>>(iter: I) -> Self {
        let mut vocab = Vocabulary::new();
        for entry in iter {
            vocab.insert(entry);
        }
        vocab
    }
}
