//! Morpheme decomposition and phonetic structure.
//!
//! The decomposer strips at most one prefix and at most one suffix, each
//! picked by fixed priority from [`affixes`], and treats the residue as
//! the root. It never fails: words matching no affix are pure roots and
//! characters outside `a-z` are classified as "other".

pub mod affixes;

use lexiforge_common::gloss::PLACEHOLDER_MEANING;
use lexiforge_common::{
    CharClass, Etymology, FrequencyClass, Morpheme, MorphemeKind, PhoneticStructure, Stress,
};

use crate::errors::WordError;
use affixes::{Affix, PREFIXES, SUFFIXES, part_of_speech_for_suffix};

/// Trim and lower-case a raw source word.
///
/// Fails for input that is blank or carries no letter at all; such input
/// cannot produce a meaningful entry.
pub fn normalize_word(raw: &str) -> Result<String, WordError> {
    let word = raw.trim().to_lowercase();
    if word.is_empty() {
        return Err(WordError::Empty);
    }
    if !word.chars().any(char::is_alphabetic) {
        return Err(WordError::NoLetters { word });
    }
    Ok(word)
}

/// Compute the C/V/X pattern, syllable count and stress heuristic of a word.
pub fn phonetic_structure(word: &str) -> PhoneticStructure {
    let mut pattern = String::with_capacity(word.len());
    let mut syllables = 0;
    let mut in_vowel_run = false;

    for c in word.chars() {
        let class = CharClass::of(c);
        pattern.push(class.symbol());
        let is_vowel = class == CharClass::Vowel;
        if is_vowel && !in_vowel_run {
            syllables += 1;
        }
        in_vowel_run = is_vowel;
    }

    let syllable_count = syllables.max(1);
    PhoneticStructure {
        pattern,
        syllable_count,
        stress_pattern: stress_pattern(syllable_count),
    }
}

fn stress_pattern(syllables: usize) -> Vec<Stress> {
    match syllables {
        0 | 1 => vec![Stress::Primary],
        2 => vec![Stress::Primary, Stress::Secondary],
        n => {
            let mut pattern = vec![Stress::Unstressed; n];
            pattern[0] = Stress::Primary;
            pattern[n - 2] = Stress::Secondary;
            pattern
        }
    }
}

/// Result of decomposing one normalized word.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    pub word: String,
    /// Prefix (optional), root, suffix (optional), in word order
    pub morphemes: Vec<Morpheme>,
    pub structure: PhoneticStructure,
}

impl Decomposition {
    pub fn morpheme(&self, kind: MorphemeKind) -> Option<&Morpheme> {
        self.morphemes.iter().find(|m| m.kind == kind)
    }

    pub fn root(&self) -> Option<&Morpheme> {
        self.morpheme(MorphemeKind::Root)
    }

    pub fn prefix(&self) -> Option<&Morpheme> {
        self.morpheme(MorphemeKind::Prefix)
    }

    pub fn suffix(&self) -> Option<&Morpheme> {
        self.morpheme(MorphemeKind::Suffix)
    }

    /// Replace the root's placeholder meaning with an enrichment-supplied one.
    pub fn apply_etymology(&mut self, etymology: &Etymology) {
        let meaning = etymology.root.trim();
        if meaning.is_empty() {
            return;
        }
        if let Some(root) = self
            .morphemes
            .iter_mut()
            .find(|m| m.kind == MorphemeKind::Root)
        {
            root.meaning = meaning.to_string();
        }
    }

    /// Suffix-driven part-of-speech guess; `noun` when nothing suggests otherwise.
    pub fn guess_part_of_speech(&self) -> &'static str {
        self.suffix()
            .and_then(|s| part_of_speech_for_suffix(&s.value))
            .unwrap_or("noun")
    }

    /// Length-based frequency bucket: short words tend to be common ones.
    pub fn frequency_class(&self) -> FrequencyClass {
        match self.word.chars().count() {
            0..=4 => FrequencyClass::High,
            5..=7 => FrequencyClass::Medium,
            _ => FrequencyClass::Low,
        }
    }
}

/// Splits words into prefix/root/suffix morphemes.
#[derive(Debug, Clone, Copy)]
pub struct Decomposer {
    prefixes: &'static [Affix],
    suffixes: &'static [Affix],
}

impl Default for Decomposer {
    fn default() -> Self {
        Self::new()
    }
}

impl Decomposer {
    pub fn new() -> Self {
        Self {
            prefixes: PREFIXES,
            suffixes: SUFFIXES,
        }
    }

    /// Decompose an already-normalized word.
    pub fn decompose(&self, word: &str) -> Decomposition {
        let mut morphemes = Vec::with_capacity(3);
        let mut rest = word;
        let mut offset = 0;

        // An affix is only taken when something remains for the root.
        if let Some(prefix) = self
            .prefixes
            .iter()
            .find(|a| rest.len() > a.value.len() && rest.starts_with(a.value))
        {
            morphemes.push(Morpheme::new(
                MorphemeKind::Prefix,
                prefix.value,
                prefix.meaning,
                0,
            ));
            rest = &rest[prefix.value.len()..];
            offset = prefix.value.chars().count();
        }

        let suffix = self
            .suffixes
            .iter()
            .find(|a| rest.len() > a.value.len() && rest.ends_with(a.value));
        let root = match suffix {
            Some(s) => &rest[..rest.len() - s.value.len()],
            None => rest,
        };

        if !root.is_empty() {
            morphemes.push(Morpheme::new(
                MorphemeKind::Root,
                root,
                PLACEHOLDER_MEANING,
                offset,
            ));
        }

        if let Some(s) = suffix {
            let start = offset + root.chars().count();
            morphemes.push(Morpheme::new(
                MorphemeKind::Suffix,
                s.value,
                s.meaning,
                start,
            ));
        }

        Decomposition {
            word: word.to_string(),
            morphemes,
            structure: phonetic_structure(word),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(d: &Decomposition) -> Vec<(MorphemeKind, &str)> {
        d.morphemes
            .iter()
            .map(|m| (m.kind, m.value.as_str()))
            .collect()
    }

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize_word("  River ").unwrap(), "river");
    }

    #[test]
    fn test_normalize_rejects_blank_and_letterless() {
        assert!(matches!(normalize_word("   "), Err(WordError::Empty)));
        assert!(matches!(
            normalize_word("42-17"),
            Err(WordError::NoLetters { .. })
        ));
    }

    #[test]
    fn test_pure_root_when_no_affix_matches() {
        let d = Decomposer::new().decompose("computer");
        assert_eq!(values(&d), vec![(MorphemeKind::Root, "computer")]);
        let root = d.root().unwrap();
        assert_eq!((root.start, root.end), (0, 8));
    }

    #[test]
    fn test_prefix_and_suffix_stripped_once() {
        let d = Decomposer::new().decompose("unhappiness");
        assert_eq!(
            values(&d),
            vec![
                (MorphemeKind::Prefix, "un"),
                (MorphemeKind::Root, "happi"),
                (MorphemeKind::Suffix, "ness"),
            ]
        );
        let suffix = d.suffix().unwrap();
        assert_eq!((suffix.start, suffix.end), (7, 11));
    }

    #[test]
    fn test_first_matching_prefix_wins() {
        let d = Decomposer::new().decompose("understand");
        assert_eq!(d.prefix().unwrap().value, "under");
    }

    #[test]
    fn test_only_one_suffix_is_stripped() {
        // "carefulness": -ness is stripped, -ful stays in the root.
        let d = Decomposer::new().decompose("carefulness");
        assert_eq!(d.root().unwrap().value, "careful");
        assert_eq!(d.suffix().unwrap().value, "ness");
    }

    #[test]
    fn test_word_equal_to_affix_stays_root() {
        let d = Decomposer::new().decompose("un");
        assert_eq!(values(&d), vec![(MorphemeKind::Root, "un")]);
    }

    #[test]
    fn test_phonetic_structure_pattern_and_syllables() {
        let s = phonetic_structure("beautiful");
        assert_eq!(s.pattern, "CVVVCVCVC");
        assert_eq!(s.syllable_count, 3);
        assert_eq!(
            s.stress_pattern,
            vec![Stress::Primary, Stress::Secondary, Stress::Unstressed]
        );
    }

    #[test]
    fn test_long_word_stress_secondary_on_penultimate() {
        let s = phonetic_structure("internationalize");
        assert_eq!(s.syllable_count, 7);
        assert_eq!(s.stress_pattern[0], Stress::Primary);
        assert_eq!(s.stress_pattern[5], Stress::Secondary);
        assert_eq!(
            s.stress_pattern
                .iter()
                .filter(|s| **s == Stress::Unstressed)
                .count(),
            5
        );
    }

    #[test]
    fn test_phonetic_structure_minimum_one_syllable() {
        let s = phonetic_structure("hmm");
        assert_eq!(s.pattern, "CCC");
        assert_eq!(s.syllable_count, 1);
        assert_eq!(s.stress_pattern, vec![Stress::Primary]);
    }

    #[test]
    fn test_two_syllables_primary_secondary() {
        let s = phonetic_structure("river");
        assert_eq!(s.stress_pattern, vec![Stress::Primary, Stress::Secondary]);
    }

    #[test]
    fn test_other_characters_marked_x() {
        let s = phonetic_structure("café-au");
        assert_eq!(s.pattern, "CVCXXVV");
    }

    #[test]
    fn test_apply_etymology_sets_root_meaning() {
        let mut d = Decomposer::new().decompose("river");
        let mut ety = Etymology::fallback();
        ety.root = "flowing water".to_string();
        d.apply_etymology(&ety);
        assert_eq!(d.root().unwrap().meaning, "flowing water");
    }

    #[test]
    fn test_part_of_speech_and_frequency_heuristics() {
        let dec = Decomposer::new();
        assert_eq!(dec.decompose("quickly").guess_part_of_speech(), "adverb");
        assert_eq!(dec.decompose("stone").guess_part_of_speech(), "noun");
        assert_eq!(dec.decompose("sun").frequency_class(), FrequencyClass::High);
        assert_eq!(
            dec.decompose("mountain").frequency_class(),
            FrequencyClass::Low
        );
    }
}
