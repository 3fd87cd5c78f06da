//! The five style rule sets.
//!
//! Each style is a unit struct implementing [`StyleRule`]; [`rule_for`] is
//! the strategy table that maps a [`Style`] to its implementation.

use lexiforge_common::{CharClass, MorphemeKind, Style};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::cleanup::collapse_runs;
use crate::morphology::Decomposition;

const FRONT_VOWELS: [char; 2] = ['e', 'i'];
const BACK_VOWELS: [char; 3] = ['a', 'o', 'u'];

/// A deterministic (given its RNG) spelling transformation.
pub trait StyleRule: Send + Sync + std::fmt::Debug {
    fn style(&self) -> Style;

    /// Transform the source characters. `rng` is the only permitted source
    /// of randomness so that seeded runs stay reproducible.
    fn apply(&self, chars: &[char], decomposition: &Decomposition, rng: &mut StdRng)
    -> Vec<char>;
}

/// Resolve a style to its rule implementation.
pub fn rule_for(style: Style) -> &'static dyn StyleRule {
    match style {
        Style::Default => &DefaultRule,
        Style::ConsonantShift => &ConsonantShiftRule,
        Style::VowelHarmony => &VowelHarmonyRule,
        Style::MorphemeEmphasis => &MorphemeEmphasisRule,
        Style::PhoneticLogic => &PhoneticLogicRule,
    }
}

fn is_vowel(c: char) -> bool {
    CharClass::of(c) == CharClass::Vowel
}

/// Char range of the root morpheme, or the whole word if none was recorded.
fn root_span(decomposition: &Decomposition, len: usize) -> (usize, usize) {
    decomposition
        .root()
        .map(|m| (m.start, m.end.min(len)))
        .unwrap_or((0, len))
}

// ============================================================================
// default
// ============================================================================

#[derive(Debug)]
pub struct DefaultRule;

impl DefaultRule {
    /// Average semantic weight of the word's morphemes.
    pub fn semantic_weight(decomposition: &Decomposition) -> f64 {
        if decomposition.morphemes.is_empty() {
            return 0.3;
        }
        let total: f64 = decomposition.morphemes.iter().map(|m| m.kind.weight()).sum();
        total / decomposition.morphemes.len() as f64
    }

    /// c↔k and f↔ph.
    fn pair_consonants(chars: &[char]) -> Vec<char> {
        let mut out = Vec::with_capacity(chars.len() + 2);
        let mut i = 0;
        while i < chars.len() {
            match (chars[i], chars.get(i + 1)) {
                ('p', Some('h')) => {
                    out.push('f');
                    i += 2;
                    continue;
                }
                ('c', _) => out.push('k'),
                ('k', _) => out.push('c'),
                ('f', _) => out.extend(['p', 'h']),
                (c, _) => out.push(c),
            }
            i += 1;
        }
        out
    }
}

impl StyleRule for DefaultRule {
    fn style(&self) -> Style {
        Style::Default
    }

    fn apply(
        &self,
        chars: &[char],
        decomposition: &Decomposition,
        rng: &mut StdRng,
    ) -> Vec<char> {
        let weight = Self::semantic_weight(decomposition);
        let mut out = chars.to_vec();
        if weight > 0.3 {
            out = Self::pair_consonants(&out);
        }
        if weight > 0.6 {
            let mut doubled = Vec::with_capacity(out.len() * 2);
            for c in out {
                doubled.push(c);
                if is_vowel(c) && rng.gen_bool(0.5) {
                    doubled.push(c);
                }
            }
            out = doubled;
        }
        out
    }
}

// ============================================================================
// consonant_shift
// ============================================================================

#[derive(Debug)]
pub struct ConsonantShiftRule;

impl ConsonantShiftRule {
    pub fn shift(c: char) -> char {
        match c {
            'b' => 'p',
            'p' => 'b',
            'd' => 't',
            't' => 'd',
            'g' => 'k',
            'k' => 'g',
            'v' => 'f',
            'f' => 'v',
            'z' => 's',
            's' => 'z',
            'j' => 'y',
            'w' => 'v',
            other => other,
        }
    }
}

impl StyleRule for ConsonantShiftRule {
    fn style(&self) -> Style {
        Style::ConsonantShift
    }

    fn apply(
        &self,
        chars: &[char],
        decomposition: &Decomposition,
        _rng: &mut StdRng,
    ) -> Vec<char> {
        let (start, end) = root_span(decomposition, chars.len());
        chars
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                if i >= start && i < end {
                    Self::shift(c)
                } else {
                    c
                }
            })
            .collect()
    }
}

// ============================================================================
// vowel_harmony
// ============================================================================

#[derive(Debug)]
pub struct VowelHarmonyRule;

impl StyleRule for VowelHarmonyRule {
    fn style(&self) -> Style {
        Style::VowelHarmony
    }

    fn apply(
        &self,
        chars: &[char],
        _decomposition: &Decomposition,
        rng: &mut StdRng,
    ) -> Vec<char> {
        let front = chars.iter().filter(|c| FRONT_VOWELS.contains(c)).count();
        let back = chars.iter().filter(|c| BACK_VOWELS.contains(c)).count();
        if front == 0 && back == 0 {
            return chars.to_vec();
        }

        // Ties go to the back class.
        let (dominant, recessive): (&[char], &[char]) = if front > back {
            (&FRONT_VOWELS[..], &BACK_VOWELS[..])
        } else {
            (&BACK_VOWELS[..], &FRONT_VOWELS[..])
        };

        chars
            .iter()
            .map(|&c| {
                if recessive.contains(&c) {
                    dominant.choose(rng).copied().unwrap_or(c)
                } else {
                    c
                }
            })
            .collect()
    }
}

// ============================================================================
// morpheme_emphasis
// ============================================================================

#[derive(Debug)]
pub struct MorphemeEmphasisRule;

impl StyleRule for MorphemeEmphasisRule {
    fn style(&self) -> Style {
        Style::MorphemeEmphasis
    }

    fn apply(
        &self,
        chars: &[char],
        decomposition: &Decomposition,
        _rng: &mut StdRng,
    ) -> Vec<char> {
        let Some(root) = decomposition.morpheme(MorphemeKind::Root) else {
            return chars.to_vec();
        };
        let end = root.end.min(chars.len());
        let len = end.saturating_sub(root.start);
        if len <= 3 {
            return chars.to_vec();
        }

        let middle = root.start + len / 2;
        let mut out = Vec::with_capacity(chars.len() + 1);
        out.extend_from_slice(&chars[..=middle]);
        out.push(chars[middle]);
        out.extend_from_slice(&chars[middle + 1..]);
        out
    }
}

// ============================================================================
// phonetic_logic
// ============================================================================

/// Consonant clusters and the single letter each one is reduced to.
pub const CLUSTERS: [(&str, char); 7] = [
    ("th", 't'),
    ("ch", 'c'),
    ("sh", 's'),
    ("ph", 'f'),
    ("gh", 'g'),
    ("ck", 'k'),
    ("ng", 'n'),
];

#[derive(Debug)]
pub struct PhoneticLogicRule;

impl PhoneticLogicRule {
    fn reduce_clusters(chars: &[char]) -> Vec<char> {
        let mut out = Vec::with_capacity(chars.len());
        let mut i = 0;
        while i < chars.len() {
            let cluster = chars.get(i + 1).and_then(|&next| {
                CLUSTERS.iter().find(|(pair, _)| {
                    let mut it = pair.chars();
                    it.next() == Some(chars[i]) && it.next() == Some(next)
                })
            });
            match cluster {
                Some((_, single)) => {
                    out.push(*single);
                    i += 2;
                }
                None => {
                    out.push(chars[i]);
                    i += 1;
                }
            }
        }
        out
    }
}

impl StyleRule for PhoneticLogicRule {
    fn style(&self) -> Style {
        Style::PhoneticLogic
    }

    fn apply(
        &self,
        chars: &[char],
        _decomposition: &Decomposition,
        _rng: &mut StdRng,
    ) -> Vec<char> {
        let reduced = Self::reduce_clusters(chars);
        let collapsed = collapse_runs(&reduced, 3, 2);
        super::cleanup::trim_edge_runs(&collapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::Decomposer;
    use rand::SeedableRng;

    fn run(style: Style, word: &str, seed: u64) -> String {
        let d = Decomposer::new().decompose(word);
        let chars: Vec<char> = word.chars().collect();
        let mut rng = StdRng::seed_from_u64(seed);
        rule_for(style)
            .apply(&chars, &d, &mut rng)
            .into_iter()
            .collect()
    }

    #[test]
    fn test_strategy_table_covers_every_style() {
        for style in Style::ALL {
            assert_eq!(rule_for(style).style(), style);
        }
    }

    #[test]
    fn test_semantic_weight_averages_morphemes() {
        let d = Decomposer::new().decompose("unhappiness");
        let w = DefaultRule::semantic_weight(&d);
        assert!((w - (0.6 + 1.0 + 0.4) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_pairs_consonants() {
        // prefix + root + suffix averages to ~0.67, but only vowels can double,
        // so the consonant pairing is visible regardless of the coin flips.
        let out = run(Style::Default, "recoding", 1);
        assert!(out.contains('k'));
        assert!(!out.contains('c'));
    }

    #[test]
    fn test_default_ph_becomes_f_and_f_becomes_ph() {
        let d = Decomposer::new().decompose("phone");
        assert!(DefaultRule::semantic_weight(&d) > 0.3);
        assert_eq!(
            DefaultRule::pair_consonants(&"phonef".chars().collect::<Vec<_>>())
                .into_iter()
                .collect::<String>(),
            "foneph"
        );
    }

    #[test]
    fn test_default_only_doubles_vowels() {
        let out = run(Style::Default, "banana", 7);
        let consonants: String = out.chars().filter(|c| !is_vowel(*c)).collect();
        assert_eq!(consonants, "bnn");
        assert!(out.len() >= 6);
    }

    #[test]
    fn test_consonant_shift_whole_root() {
        assert_eq!(run(Style::ConsonantShift, "computer", 0), "combuder");
    }

    #[test]
    fn test_consonant_shift_skips_affixes() {
        // "re" + "bound" + "ed": only the root shifts.
        assert_eq!(run(Style::ConsonantShift, "rebounded", 0), "repounted");
    }

    #[test]
    fn test_consonant_shift_one_way_entries() {
        assert_eq!(ConsonantShiftRule::shift('j'), 'y');
        assert_eq!(ConsonantShiftRule::shift('w'), 'v');
        assert_eq!(ConsonantShiftRule::shift('y'), 'y');
        assert_eq!(ConsonantShiftRule::shift('m'), 'm');
    }

    #[test]
    fn test_vowel_harmony_back_dominant() {
        let out = run(Style::VowelHarmony, "autumnite", 3);
        // a,u,u back (3) vs i,e front (2): front vowels become back vowels.
        assert!(out.chars().all(|c| !FRONT_VOWELS.contains(&c)));
        assert_eq!(out.chars().count(), 9);
    }

    #[test]
    fn test_vowel_harmony_front_dominant() {
        let out = run(Style::VowelHarmony, "settlement", 3);
        assert!(out.chars().all(|c| !BACK_VOWELS.contains(&c)));
    }

    #[test]
    fn test_vowel_harmony_seeded_is_reproducible() {
        assert_eq!(
            run(Style::VowelHarmony, "information", 42),
            run(Style::VowelHarmony, "information", 42)
        );
    }

    #[test]
    fn test_vowel_harmony_without_vowels_is_identity() {
        assert_eq!(run(Style::VowelHarmony, "rhythm", 0), "rhythm");
    }

    #[test]
    fn test_morpheme_emphasis_doubles_root_middle() {
        // root "computer" (8 chars): middle index 4 is 'u'
        assert_eq!(run(Style::MorphemeEmphasis, "computer", 0), "compuuter");
    }

    #[test]
    fn test_morpheme_emphasis_respects_affixes() {
        // "un" + "kind" + "ness": root middle is 'n' at word index 4
        assert_eq!(run(Style::MorphemeEmphasis, "unkindness", 0), "unkinndness");
    }

    #[test]
    fn test_morpheme_emphasis_short_root_untouched() {
        assert_eq!(run(Style::MorphemeEmphasis, "cat", 0), "cat");
    }

    #[test]
    fn test_phonetic_logic_reduces_clusters() {
        assert_eq!(run(Style::PhoneticLogic, "thinking", 0), "tinkin");
        assert_eq!(run(Style::PhoneticLogic, "photograph", 0), "fotograf");
        assert_eq!(run(Style::PhoneticLogic, "shack", 0), "sak");
    }

    #[test]
    fn test_phonetic_logic_collapses_repeats() {
        assert_eq!(run(Style::PhoneticLogic, "zzzap", 0), "zap");
        assert_eq!(run(Style::PhoneticLogic, "brrrum", 0), "brrum");
    }
}
