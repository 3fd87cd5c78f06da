//! On-disk vocabulary and dictionary files.
//!
//! Layout under the project's `.lexiforge/` directory:
//!
//! ```text
//! vocabulary.json
//! dictionaries/
//!   constructed_to_source.json
//!   constructed_definitions.json
//!   source_to_constructed.json
//!   metadata.json
//! ```

use lexiforge_common::Style;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{LexiconMetadata, LookupTables, Vocabulary};
use crate::errors::StoreError;
use crate::persist::{read_json, write_json_atomic};

#[derive(Debug, Clone)]
pub struct LexiconStore {
    vocabulary_file: PathBuf,
    dictionaries_dir: PathBuf,
    language_name: String,
    style: Style,
}

impl LexiconStore {
    pub fn new(
        vocabulary_file: PathBuf,
        dictionaries_dir: PathBuf,
        language_name: &str,
        style: Style,
    ) -> Self {
        Self {
            vocabulary_file,
            dictionaries_dir,
            language_name: language_name.to_string(),
            style,
        }
    }

    pub fn vocabulary_file(&self) -> &Path {
        &self.vocabulary_file
    }

    pub fn dictionaries_dir(&self) -> &Path {
        &self.dictionaries_dir
    }

    pub fn language_name(&self) -> &str {
        &self.language_name
    }

    /// Load the saved vocabulary, or an empty one for a fresh language.
    pub async fn load(&self) -> Result<Vocabulary, StoreError> {
        Ok(read_json(&self.vocabulary_file).await?.unwrap_or_default())
    }

    pub async fn save(&self, vocab: &Vocabulary) -> Result<(), StoreError> {
        write_json_atomic(&self.vocabulary_file, vocab).await
    }

    /// Persist the vocabulary and rewrite every dictionary file from it.
    pub async fn flush(&self, vocab: &Vocabulary) -> Result<LexiconMetadata, StoreError> {
        self.save(vocab).await?;

        let tables = LookupTables::build(vocab);
        let metadata = LexiconMetadata::build(&self.language_name, self.style, vocab, &tables);
        let dir = &self.dictionaries_dir;

        write_json_atomic(
            &dir.join("constructed_to_source.json"),
            &tables.constructed_to_source,
        )
        .await?;
        write_json_atomic(
            &dir.join("constructed_definitions.json"),
            &tables.constructed_definitions,
        )
        .await?;
        write_json_atomic(
            &dir.join("source_to_constructed.json"),
            &tables.source_to_constructed,
        )
        .await?;
        write_json_atomic(&dir.join("metadata.json"), &metadata).await?;

        debug!(
            words = vocab.len(),
            dir = %dir.display(),
            "Flushed dictionaries"
        );
        Ok(metadata)
    }
}
