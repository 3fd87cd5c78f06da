use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::errors::StoreError;
use crate::persist::{read_json, remove_if_exists, write_json_atomic};

/// Progress record written every save interval and on stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCheckpoint {
    /// Index of the next word to process in the run's input list
    pub current_index: usize,
    pub total_words: usize,
    /// Source words already handled in this run (committed or duplicate)
    pub processed_words: BTreeSet<String>,
    pub timestamp: DateTime<Utc>,
    pub language_name: String,
    pub vocabulary_size: usize,
}

impl BatchCheckpoint {
    pub fn new(language_name: &str, total_words: usize) -> Self {
        Self {
            current_index: 0,
            total_words,
            processed_words: BTreeSet::new(),
            timestamp: Utc::now(),
            language_name: language_name.to_string(),
            vocabulary_size: 0,
        }
    }

    /// Drop processed words that are not among `words` (normalized forms).
    pub fn restrict_to(&mut self, words: impl IntoIterator<Item = String>) {
        let input: BTreeSet<String> = words.into_iter().collect();
        self.processed_words.retain(|w| input.contains(w));
    }

    pub fn remaining(&self) -> usize {
        self.total_words.saturating_sub(self.processed_words.len())
    }
}

pub struct CheckpointStore {
    checkpoint_file: PathBuf,
}

impl CheckpointStore {
    pub fn new(checkpoint_file: PathBuf) -> Self {
        Self { checkpoint_file }
    }

    pub fn path(&self) -> &Path {
        &self.checkpoint_file
    }

    pub async fn load(&self) -> Result<Option<BatchCheckpoint>, StoreError> {
        read_json(&self.checkpoint_file).await
    }

    pub async fn save(&self, checkpoint: &BatchCheckpoint) -> Result<(), StoreError> {
        write_json_atomic(&self.checkpoint_file, checkpoint).await
    }

    /// Remove the checkpoint after a completed run.
    pub async fn discard(&self) -> Result<(), StoreError> {
        remove_if_exists(&self.checkpoint_file).await
    }
}
