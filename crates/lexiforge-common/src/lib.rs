//! Shared domain types for the lexiforge lexicon builder.
//!
//! These types are the persisted shape of a constructed language: the
//! per-word entries, their morphological and phonetic analysis, and the
//! style selector that fixes which rule set produced them.

pub mod gloss;
pub mod model;
pub mod style;

pub use gloss::{Definition, Etymology};
pub use model::{
    CharClass, FrequencyClass, Morpheme, MorphemeKind, PhoneticStructure, Stress, WordEntry,
};
pub use style::{PronunciationMode, Style};
