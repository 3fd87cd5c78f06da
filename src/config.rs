use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::analysis::ConsistencyAnalyzer;
use crate::enrichment::{Enricher, HttpEnrichmentSource};
use crate::lexicon::LexiconStore;
use crate::lexicon_config::{CONFIG_FILE, LexiconToml};
use crate::transform::Engine;

/// Name of the per-project state directory.
pub const LEXIFORGE_DIR: &str = ".lexiforge";

/// Runtime configuration for lexiforge.
///
/// Merges `lexicon.toml`, environment overrides and CLI flags, and resolves
/// every path under the project's `.lexiforge` directory.
#[derive(Debug, Clone)]
pub struct Config {
    pub project_dir: PathBuf,
    pub lexiforge_dir: PathBuf,
    pub toml: LexiconToml,
    pub verbose: bool,
    /// Warnings from environment overrides and validation
    pub warnings: Vec<String>,
}

impl Config {
    /// Load configuration for `project_dir` (file → environment).
    pub fn load(project_dir: &Path, verbose: bool) -> Result<Self> {
        let project_dir = project_dir
            .canonicalize()
            .with_context(|| format!("Failed to resolve project directory {}", project_dir.display()))?;
        let lexiforge_dir = project_dir.join(LEXIFORGE_DIR);
        let mut toml = LexiconToml::load_or_default(&lexiforge_dir)?;

        let mut warnings = toml.apply_env(|key| std::env::var(key).ok());
        warnings.extend(toml.validate());

        Ok(Self {
            project_dir,
            lexiforge_dir,
            toml,
            verbose,
            warnings,
        })
    }

    /// Apply the `--save-interval` CLI override.
    pub fn with_save_interval(mut self, save_interval: Option<usize>) -> Self {
        if let Some(n) = save_interval {
            self.toml.batch.save_interval = n;
        }
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.config_file().exists()
    }

    pub fn config_file(&self) -> PathBuf {
        self.lexiforge_dir.join(CONFIG_FILE)
    }

    pub fn vocabulary_file(&self) -> PathBuf {
        self.lexiforge_dir.join("vocabulary.json")
    }

    pub fn checkpoint_file(&self) -> PathBuf {
        self.lexiforge_dir.join("checkpoint.json")
    }

    pub fn dictionaries_dir(&self) -> PathBuf {
        self.lexiforge_dir.join("dictionaries")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.lexiforge_dir.join("logs")
    }

    pub fn lock_file(&self) -> PathBuf {
        self.lexiforge_dir.join("batch.lock")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(self.dictionaries_dir())
            .context("Failed to create dictionaries directory")?;
        std::fs::create_dir_all(self.log_dir()).context("Failed to create log directory")?;
        Ok(())
    }

    pub fn language_name(&self) -> &str {
        &self.toml.language.name
    }

    pub fn engine(&self) -> Engine {
        Engine::new(
            self.toml.language.style,
            self.toml.randomness.to_randomness(),
            self.toml.language.pronunciation,
        )
    }

    pub fn store(&self) -> LexiconStore {
        LexiconStore::new(
            self.vocabulary_file(),
            self.dictionaries_dir(),
            self.language_name(),
            self.toml.language.style,
        )
    }

    pub fn analyzer(&self) -> ConsistencyAnalyzer {
        ConsistencyAnalyzer::new(self.toml.analysis.to_thresholds())
    }

    pub fn enricher(&self) -> Enricher {
        let section = &self.toml.enrichment;
        if section.enabled {
            Enricher::new(
                Arc::new(HttpEnrichmentSource::new(section.endpoint.clone())),
                section.timeout(),
            )
        } else {
            Enricher::disabled()
        }
    }
}
