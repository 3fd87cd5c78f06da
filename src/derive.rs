//! Turning a source word into a vocabulary entry.
//!
//! Shared by the batch orchestrator (new words) and reconstruction
//! (re-deriving existing ones). Enrichment happens outside; this step is
//! synchronous and never suspends.

use chrono::{DateTime, Utc};
use lexiforge_common::{Definition, Etymology, WordEntry};

use crate::errors::WordError;
use crate::morphology::{Decomposer, normalize_word};
use crate::transform::Engine;

#[derive(Debug, Clone)]
pub struct WordDeriver {
    decomposer: Decomposer,
    engine: Engine,
}

impl WordDeriver {
    pub fn new(engine: Engine) -> Self {
        Self {
            decomposer: Decomposer::new(),
            engine,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Decompose and transform `word`, then assemble its entry.
    ///
    /// `word` is normalized first; an enrichment-supplied part of speech
    /// wins over the suffix heuristic.
    pub fn derive(
        &self,
        word: &str,
        etymology: Option<Etymology>,
        definition: Definition,
        created_at: DateTime<Utc>,
    ) -> Result<WordEntry, WordError> {
        let word = normalize_word(word)?;
        let mut decomposition = self.decomposer.decompose(&word);
        if let Some(e) = &etymology {
            decomposition.apply_etymology(e);
        }

        let transformation = self.engine.transform(&decomposition);
        if transformation.constructed.is_empty() {
            return Err(WordError::Failed {
                word,
                message: "transformation produced an empty word".to_string(),
            });
        }

        let part_of_speech = definition
            .part_of_speech
            .clone()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| decomposition.guess_part_of_speech().to_string());

        Ok(WordEntry {
            frequency_class: decomposition.frequency_class(),
            source: word,
            constructed: transformation.constructed,
            pronunciation: transformation.pronunciation,
            morphemes: decomposition.morphemes,
            phonetic_structure: transformation.structure,
            applied_rules: transformation.applied_rules,
            part_of_speech,
            definition,
            etymology,
            created_at,
        })
    }
}
