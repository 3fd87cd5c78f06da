//! Transformation engine: source word + decomposition → constructed word.
//!
//! The engine resolves its [`Style`] to a [`StyleRule`] once, at
//! construction, then for every word:
//!
//! 1. applies the style rule,
//! 2. runs the shared cleanup ([`cleanup::finalize`]),
//! 3. renders the pronunciation,
//! 4. records which positions changed.
//!
//! All randomness comes from a per-word RNG derived from [`Randomness`], so
//! a seeded engine maps the same word to the same output no matter where
//! it appears in a batch.

pub mod cleanup;
pub mod pronounce;
pub mod styles;

use lexiforge_common::{PhoneticStructure, PronunciationMode, Style};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::morphology::{Decomposition, phonetic_structure};
pub use styles::{StyleRule, rule_for};

/// Source of randomness for the styles that use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Randomness {
    /// Reproducible: the per-word RNG is seeded from this value and the word
    Seeded(u64),
    /// Deliberate run-to-run variety
    Variety,
}

impl Default for Randomness {
    fn default() -> Self {
        Randomness::Seeded(0)
    }
}

impl Randomness {
    fn rng_for(self, word: &str) -> StdRng {
        match self {
            Randomness::Seeded(seed) => StdRng::seed_from_u64(seed ^ fnv1a(word)),
            Randomness::Variety => StdRng::from_entropy(),
        }
    }
}

/// FNV-1a, stable across builds and platforms (unlike `DefaultHasher`).
fn fnv1a(text: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    text.bytes()
        .fold(OFFSET, |hash, b| (hash ^ u64::from(b)).wrapping_mul(PRIME))
}

/// Output of transforming one word.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformation {
    pub constructed: String,
    pub pronunciation: String,
    pub structure: PhoneticStructure,
    pub applied_rules: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Engine {
    style: Style,
    rule: &'static dyn StyleRule,
    randomness: Randomness,
    pronunciation: PronunciationMode,
}

impl Engine {
    pub fn new(style: Style, randomness: Randomness, pronunciation: PronunciationMode) -> Self {
        Self {
            style,
            rule: rule_for(style),
            randomness,
            pronunciation,
        }
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn randomness(&self) -> Randomness {
        self.randomness
    }

    pub fn pronunciation_mode(&self) -> PronunciationMode {
        self.pronunciation
    }

    /// Transform a decomposed word. Never fails; a transformation that would
    /// leave nothing behind yields the source word unchanged.
    pub fn transform(&self, decomposition: &Decomposition) -> Transformation {
        let source: Vec<char> = decomposition.word.chars().collect();
        let mut rng = self.randomness.rng_for(&decomposition.word);

        let styled = self.rule.apply(&source, decomposition, &mut rng);
        let mut out = cleanup::finalize(&styled);
        if out.is_empty() {
            out = source.clone();
        }

        let constructed: String = out.iter().collect();
        Transformation {
            pronunciation: pronounce::render(&constructed, self.pronunciation),
            structure: phonetic_structure(&constructed),
            applied_rules: self.diagnostics(&source, &out),
            constructed,
        }
    }

    fn diagnostics(&self, source: &[char], out: &[char]) -> Vec<String> {
        let mut rules = vec![format!("style:{}", self.style)];
        rules.extend(
            source
                .iter()
                .zip(out)
                .enumerate()
                .filter(|(_, (a, b))| a != b)
                .map(|(i, (a, b))| format!("pos:{}:{}>{}", i, a, b)),
        );
        if source.len() != out.len() {
            rules.push(format!("len:{}>{}", source.len(), out.len()));
        }
        rules
    }
}
