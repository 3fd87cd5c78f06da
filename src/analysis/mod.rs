//! Consistency analysis over a whole vocabulary.
//!
//! Source and constructed spellings are walked in lockstep by index. For
//! every source letter we count which constructed letter appeared at the
//! same position; a letter that always maps to the same target scores 100,
//! one that scatters across targets scores lower. The vocabulary score is
//! the mean over every distinct source letter observed.

use lexiforge_common::CharClass;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::lexicon::Vocabulary;

/// Distinct constructed vowels a source letter may produce before it counts as conflicted.
pub const MAX_VOWEL_TARGETS: usize = 3;
/// Distinct constructed consonants a source letter may produce before it counts as conflicted.
pub const MAX_CONSONANT_TARGETS: usize = 2;

/// Source letter → (constructed letter → occurrences).
pub type TransformTable = BTreeMap<char, BTreeMap<char, usize>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub vowel_transforms: TransformTable,
    pub consonant_transforms: TransformTable,
    /// Mean per-letter determinism in `[0, 100]`; 0 for an empty vocabulary
    pub consistency_score: f64,
    pub conflict_count: usize,
    /// Source letters that produced too many distinct targets
    pub conflicted: Vec<char>,
    /// Set when `conflict_count` exceeds the configured threshold
    pub pattern_conflict: bool,
}

/// Policy thresholds for the reconstruction recommendation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisThresholds {
    pub min_consistency: f64,
    /// Fraction of the vocabulary that may be new before reconstruction is advised
    pub growth_ratio: f64,
    pub size_threshold: usize,
    pub conflict_threshold: usize,
}

impl Default for AnalysisThresholds {
    fn default() -> Self {
        Self {
            min_consistency: 70.0,
            growth_ratio: 0.10,
            size_threshold: 50,
            conflict_threshold: 3,
        }
    }
}

/// Whether a reconstruction pass is advisable, and why.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconstructionAdvice {
    pub recommended: bool,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ConsistencyAnalyzer {
    thresholds: AnalysisThresholds,
}

impl ConsistencyAnalyzer {
    pub fn new(thresholds: AnalysisThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &AnalysisThresholds {
        &self.thresholds
    }

    pub fn analyze(&self, vocab: &Vocabulary) -> ConsistencyReport {
        let mut report = ConsistencyReport::default();

        for entry in vocab.entries() {
            for (s, t) in entry.source.chars().zip(entry.constructed.chars()) {
                let table = match CharClass::of(s) {
                    CharClass::Vowel => &mut report.vowel_transforms,
                    CharClass::Consonant => &mut report.consonant_transforms,
                    CharClass::Other => continue,
                };
                *table.entry(s).or_default().entry(t).or_default() += 1;
            }
        }

        let per_letter: Vec<f64> = report
            .vowel_transforms
            .values()
            .chain(report.consonant_transforms.values())
            .map(determinism)
            .collect();
        if !per_letter.is_empty() {
            report.consistency_score = per_letter.iter().sum::<f64>() / per_letter.len() as f64;
        }

        report.conflicted = report
            .vowel_transforms
            .iter()
            .chain(report.consonant_transforms.iter())
            .filter(|(_, targets)| is_conflicted(targets))
            .map(|(&source, _)| source)
            .collect();
        report.conflict_count = report.conflicted.len();
        report.pattern_conflict = report.conflict_count > self.thresholds.conflict_threshold;
        report
    }

    /// Decide whether to recommend reconstruction after `new_words` were added.
    pub fn recommend(
        &self,
        report: &ConsistencyReport,
        new_words: usize,
        vocabulary_size: usize,
    ) -> ReconstructionAdvice {
        let t = &self.thresholds;
        let mut reasons = Vec::new();

        if report.consistency_score < t.min_consistency {
            reasons.push(format!(
                "consistency score {:.1} is below {:.1}",
                report.consistency_score, t.min_consistency
            ));
        }
        if new_words as f64 > vocabulary_size as f64 * t.growth_ratio {
            reasons.push(format!(
                "{} new words exceed {:.0}% of the {}-word vocabulary",
                new_words,
                t.growth_ratio * 100.0,
                vocabulary_size
            ));
        }
        if vocabulary_size > t.size_threshold {
            reasons.push(format!(
                "vocabulary size {} exceeds {}",
                vocabulary_size, t.size_threshold
            ));
        }
        if report.pattern_conflict {
            reasons.push(format!(
                "{} source letters have conflicting mappings",
                report.conflict_count
            ));
        }

        ReconstructionAdvice {
            recommended: !reasons.is_empty(),
            reasons,
        }
    }
}

/// Share of observations that went to the most frequent target, as a percentage.
fn determinism(targets: &BTreeMap<char, usize>) -> f64 {
    let total: usize = targets.values().sum();
    let top = targets.values().copied().max().unwrap_or(0);
    if total == 0 {
        0.0
    } else {
        top as f64 / total as f64 * 100.0
    }
}

fn is_conflicted(targets: &BTreeMap<char, usize>) -> bool {
    let vowels = targets
        .keys()
        .filter(|c| CharClass::of(**c) == CharClass::Vowel)
        .count();
    let consonants = targets
        .keys()
        .filter(|c| CharClass::of(**c) == CharClass::Consonant)
        .count();
    vowels > MAX_VOWEL_TARGETS || consonants > MAX_CONSONANT_TARGETS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::test_support::entry;

    fn vocab(pairs: &[(&str, &str)]) -> Vocabulary {
        pairs.iter().map(|(s, c)| entry(s, c)).collect()
    }

    #[test]
    fn test_empty_vocabulary_scores_zero() {
        let report = ConsistencyAnalyzer::default().analyze(&Vocabulary::new());
        assert_eq!(report.consistency_score, 0.0);
        assert_eq!(report.conflict_count, 0);
        assert!(!report.pattern_conflict);
    }

    #[test]
    fn test_identity_vocabulary_scores_hundred() {
        let report =
            ConsistencyAnalyzer::default().analyze(&vocab(&[("sun", "sun"), ("moon", "moon")]));
        assert!((report.consistency_score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_tables_record_lockstep_targets() {
        let report =
            ConsistencyAnalyzer::default().analyze(&vocab(&[("bat", "pat"), ("bed", "ped")]));
        assert_eq!(report.consonant_transforms[&'b'][&'p'], 2);
        assert_eq!(report.vowel_transforms[&'a'][&'a'], 1);
        assert_eq!(report.vowel_transforms[&'e'][&'e'], 1);
    }

    #[test]
    fn test_score_is_mean_of_per_letter_determinism() {
        // 'b' -> p, p (100%); 'a' -> a, o (50%); 't' -> t, t (100%)
        let report =
            ConsistencyAnalyzer::default().analyze(&vocab(&[("bat", "pat"), ("bat2", "pot")]));
        // letters observed: a, b, t  => (50 + 100 + 100) / 3
        assert!((report.consistency_score - 250.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_stays_in_range() {
        let report = ConsistencyAnalyzer::default().analyze(&vocab(&[
            ("abc", "xyz"),
            ("abd", "qrs"),
            ("abe", "uio"),
        ]));
        assert!(report.consistency_score >= 0.0);
        assert!(report.consistency_score <= 100.0);
    }

    #[test]
    fn test_conflict_detection() {
        // 'k' maps to three distinct consonants -> conflicted
        let report = ConsistencyAnalyzer::default().analyze(&vocab(&[
            ("ka", "ka"),
            ("ko", "go"),
            ("ku", "cu"),
        ]));
        assert_eq!(report.conflicted, vec!['k']);
        assert_eq!(report.conflict_count, 1);
        assert!(!report.pattern_conflict);
    }

    #[test]
    fn test_pattern_conflict_above_threshold() {
        let analyzer = ConsistencyAnalyzer::new(AnalysisThresholds {
            conflict_threshold: 0,
            ..AnalysisThresholds::default()
        });
        let report = analyzer.analyze(&vocab(&[("ka", "ka"), ("ko", "go"), ("ku", "cu")]));
        assert!(report.pattern_conflict);
    }

    #[test]
    fn test_recommend_collects_every_reason() {
        let analyzer = ConsistencyAnalyzer::default();
        let report = ConsistencyReport {
            consistency_score: 40.0,
            conflict_count: 5,
            pattern_conflict: true,
            ..ConsistencyReport::default()
        };
        let advice = analyzer.recommend(&report, 30, 60);
        assert!(advice.recommended);
        assert_eq!(advice.reasons.len(), 4);
    }

    #[test]
    fn test_recommend_nothing_for_small_consistent_vocabulary() {
        let analyzer = ConsistencyAnalyzer::default();
        let report = ConsistencyReport {
            consistency_score: 95.0,
            ..ConsistencyReport::default()
        };
        let advice = analyzer.recommend(&report, 1, 20);
        assert!(!advice.recommended);
        assert!(advice.reasons.is_empty());
    }

    #[test]
    fn test_recommend_on_growth_alone() {
        let analyzer = ConsistencyAnalyzer::default();
        let report = ConsistencyReport {
            consistency_score: 95.0,
            ..ConsistencyReport::default()
        };
        let advice = analyzer.recommend(&report, 5, 20);
        assert!(advice.recommended);
        assert!(advice.reasons[0].contains("new words"));
    }
}
