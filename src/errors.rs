//! Typed error hierarchy for lexiforge.
//!
//! Four enums cover the failure domains of a batch run:
//! - `WordError`: a single word could not be processed (the word is skipped)
//! - `EnrichmentError`: the enrichment service failed (callers fall back to defaults)
//! - `StoreError`: checkpoint or dictionary persistence failed (surfaced as a warning)
//! - `LockError`: another run already owns the project directory

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while processing one source word.
#[derive(Debug, Error)]
pub enum WordError {
    #[error("word is empty after normalization")]
    Empty,

    #[error("word '{word}' contains no letters")]
    NoLetters { word: String },

    #[error("failed to process '{word}': {message}")]
    Failed { word: String, message: String },
}

/// Errors from the optional enrichment service.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("enrichment request for '{word}' timed out after {secs}s")]
    Timeout { word: String, secs: u64 },

    #[error("enrichment service unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("enrichment service returned status {status}")]
    Status { status: u16 },

    #[error("enrichment response for '{word}' had no recognized sections")]
    Unparseable { word: String },
}

/// Errors from persisting or loading checkpoints, vocabularies and dictionaries.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Errors acquiring the single-writer lock for a project directory.
#[derive(Debug, Error)]
pub enum LockError {
    #[error("Another lexiforge run holds the lock at {path}")]
    Held { path: PathBuf },

    #[error("Failed to open lock file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A word that was skipped because it failed, kept in run reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordFailure {
    pub word: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl WordFailure {
    pub fn new(word: &str, error: &impl std::fmt::Display) -> Self {
        Self {
            word: word.to_string(),
            message: error.to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_error_no_letters_carries_word() {
        let err = WordError::NoLetters {
            word: "1234".to_string(),
        };
        match &err {
            WordError::NoLetters { word } => assert_eq!(word, "1234"),
            _ => panic!("Expected NoLetters"),
        }
        assert!(err.to_string().contains("1234"));
    }

    #[test]
    fn enrichment_timeout_mentions_duration() {
        let err = EnrichmentError::Timeout {
            word: "river".to_string(),
            secs: 30,
        };
        let msg = err.to_string();
        assert!(msg.contains("river"));
        assert!(msg.contains("30s"));
    }

    #[test]
    fn store_error_write_carries_path() {
        let path = PathBuf::from("/lexicon/checkpoint.json");
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = StoreError::Write {
            path: path.clone(),
            source: io_err,
        };
        match &err {
            StoreError::Write { path: p, source } => {
                assert_eq!(p, &path);
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            _ => panic!("Expected Write"),
        }
    }

    #[test]
    fn lock_error_held_is_matchable() {
        let err = LockError::Held {
            path: PathBuf::from("batch.lock"),
        };
        assert!(matches!(err, LockError::Held { .. }));
        assert!(err.to_string().contains("batch.lock"));
    }

    #[test]
    fn all_error_types_implement_std_error_trait() {
        fn assert_std_error<E: std::error::Error>(_: &E) {}
        assert_std_error(&WordError::Empty);
        assert_std_error(&EnrichmentError::Status { status: 503 });
        assert_std_error(&StoreError::Serialize(
            serde_json::from_str::<u8>("x").unwrap_err(),
        ));
        assert_std_error(&LockError::Held {
            path: PathBuf::from("x"),
        });
    }

    #[test]
    fn word_failure_records_message() {
        let failure = WordFailure::new("  ", &WordError::Empty);
        assert_eq!(failure.word, "  ");
        assert_eq!(failure.message, "word is empty after normalization");
    }
}
