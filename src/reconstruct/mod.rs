//! Vocabulary-wide re-application of the transformation rules.
//!
//! Every entry is re-derived from its source word with the current engine.
//! The rebuilt vocabulary replaces the old one only if at least one word was
//! reprocessed; words that fail are reported and kept as they were.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::ConsistencyAnalyzer;
use crate::derive::WordDeriver;
use crate::errors::WordFailure;
use crate::lexicon::Vocabulary;

/// A source word whose constructed form changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordDiff {
    pub source: String,
    pub old_constructed: String,
    pub new_constructed: String,
    pub old_pronunciation: String,
    pub new_pronunciation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconstructionReport {
    /// Consistency score before the pass
    pub before: f64,
    /// Consistency score of the rebuilt vocabulary
    pub after: f64,
    pub delta: f64,
    pub reprocessed: usize,
    pub changed: usize,
    pub changes: Vec<WordDiff>,
    pub failures: Vec<WordFailure>,
    /// Whether the rebuilt vocabulary replaced the old one
    pub committed: bool,
}

pub struct Reconstructor<'a> {
    deriver: &'a WordDeriver,
    analyzer: &'a ConsistencyAnalyzer,
}

impl<'a> Reconstructor<'a> {
    pub fn new(deriver: &'a WordDeriver, analyzer: &'a ConsistencyAnalyzer) -> Self {
        Self { deriver, analyzer }
    }

    /// Rebuild `vocab` in place.
    ///
    /// `previous_score` is the last measured consistency; when absent the
    /// current vocabulary is scored first.
    pub fn run(&self, vocab: &mut Vocabulary, previous_score: Option<f64>) -> ReconstructionReport {
        let before =
            previous_score.unwrap_or_else(|| self.analyzer.analyze(vocab).consistency_score);

        let mut rebuilt = Vocabulary::new();
        let mut changes = Vec::new();
        let mut failures = Vec::new();
        let mut reprocessed = 0;

        for old in vocab.entries() {
            match self.deriver.derive(
                &old.source,
                old.etymology.clone(),
                old.definition.clone(),
                old.created_at,
            ) {
                Ok(new) => {
                    reprocessed += 1;
                    if new.constructed != old.constructed {
                        changes.push(WordDiff {
                            source: old.source.clone(),
                            old_constructed: old.constructed.clone(),
                            new_constructed: new.constructed.clone(),
                            old_pronunciation: old.pronunciation.clone(),
                            new_pronunciation: new.pronunciation.clone(),
                        });
                    }
                    rebuilt.insert(new);
                }
                Err(e) => {
                    warn!(word = %old.source, error = %e, "Keeping entry that failed to re-derive");
                    failures.push(WordFailure::new(&old.source, &e));
                    rebuilt.insert(old.clone());
                }
            }
        }

        let committed = reprocessed > 0;
        if committed {
            *vocab = rebuilt;
        }
        let after = self.analyzer.analyze(vocab).consistency_score;

        info!(
            reprocessed,
            changed = changes.len(),
            failed = failures.len(),
            before,
            after,
            "Reconstruction finished"
        );

        ReconstructionReport {
            before,
            after,
            delta: after - before,
            reprocessed,
            changed: changes.len(),
            changes,
            failures,
            committed,
        }
    }
}
