//! Bidirectional lookup tables and aggregate metadata.

use chrono::{DateTime, Utc};
use lexiforge_common::{CharClass, Style};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::Vocabulary;

/// A source word listed under a constructed form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceGloss {
    pub source: String,
    pub definition: String,
    pub part_of_speech: String,
}

/// The three lookup tables produced from a vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupTables {
    /// Constructed → every source word that produced it, with definitions
    pub constructed_to_source: BTreeMap<String, Vec<SourceGloss>>,
    /// Constructed → its definition written in the constructed language
    pub constructed_definitions: BTreeMap<String, String>,
    pub source_to_constructed: BTreeMap<String, String>,
}

impl LookupTables {
    pub fn build(vocab: &Vocabulary) -> Self {
        let mut tables = LookupTables::default();
        for entry in vocab.entries() {
            tables
                .constructed_to_source
                .entry(entry.constructed.clone())
                .or_default()
                .push(SourceGloss {
                    source: entry.source.clone(),
                    definition: entry.definition.primary.clone(),
                    part_of_speech: entry.part_of_speech.clone(),
                });
            tables
                .constructed_definitions
                .entry(entry.constructed.clone())
                .or_insert_with(|| vocab.translate_text(&entry.definition.primary));
            tables
                .source_to_constructed
                .insert(entry.source.clone(), entry.constructed.clone());
        }
        tables
    }

    /// Source words for a constructed form (more than one on collision).
    pub fn sources_of(&self, constructed: &str) -> Vec<&str> {
        self.constructed_to_source
            .get(constructed)
            .map(|glosses| glosses.iter().map(|g| g.source.as_str()).collect())
            .unwrap_or_default()
    }

    /// Constructed forms shared by more than one source word.
    pub fn collisions(&self) -> impl Iterator<Item = (&String, &Vec<SourceGloss>)> {
        self.constructed_to_source
            .iter()
            .filter(|(_, glosses)| glosses.len() > 1)
    }
}

/// Letters used by the constructed vocabulary, grouped by class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneticInventory {
    pub vowels: BTreeSet<char>,
    pub consonants: BTreeSet<char>,
    pub other: BTreeSet<char>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub by_part_of_speech: BTreeMap<String, usize>,
    pub by_frequency_class: BTreeMap<String, usize>,
    pub average_source_length: f64,
    pub average_constructed_length: f64,
    /// Entries whose constructed form differs from the source word
    pub transformed_words: usize,
    /// Constructed forms shared by several source words
    pub collisions: usize,
}

/// Aggregate description written alongside the lookup tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconMetadata {
    pub language_name: String,
    pub style: Style,
    pub vocabulary_size: usize,
    pub phonetic_inventory: PhoneticInventory,
    pub statistics: GenerationStats,
    pub generated_at: DateTime<Utc>,
}

impl LexiconMetadata {
    pub fn build(language_name: &str, style: Style, vocab: &Vocabulary, tables: &LookupTables) -> Self {
        let mut inventory = PhoneticInventory::default();
        let mut stats = GenerationStats::default();
        let mut source_chars = 0usize;
        let mut constructed_chars = 0usize;

        for entry in vocab.entries() {
            for c in entry.constructed.chars() {
                match CharClass::of(c) {
                    CharClass::Vowel => inventory.vowels.insert(c),
                    CharClass::Consonant => inventory.consonants.insert(c),
                    CharClass::Other => inventory.other.insert(c),
                };
            }
            *stats
                .by_part_of_speech
                .entry(entry.part_of_speech.clone())
                .or_default() += 1;
            *stats
                .by_frequency_class
                .entry(entry.frequency_class.to_string())
                .or_default() += 1;
            source_chars += entry.source.chars().count();
            constructed_chars += entry.constructed.chars().count();
            if entry.source != entry.constructed {
                stats.transformed_words += 1;
            }
        }

        if !vocab.is_empty() {
            stats.average_source_length = source_chars as f64 / vocab.len() as f64;
            stats.average_constructed_length = constructed_chars as f64 / vocab.len() as f64;
        }
        stats.collisions = tables.collisions().count();

        Self {
            language_name: language_name.to_string(),
            style,
            vocabulary_size: vocab.len(),
            phonetic_inventory: inventory,
            statistics: stats,
            generated_at: Utc::now(),
        }
    }
}
