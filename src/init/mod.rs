//! `lexiforge init`: create the `.lexiforge/` directory for a new language.
//!
//! ```text
//! .lexiforge/
//! ├── lexicon.toml     # Language settings
//! ├── dictionaries/    # Generated lookup tables
//! └── logs/            # Rotated JSON logs
//! ```
//!
//! The vocabulary and checkpoint files are created by the first batch run.

use anyhow::{Context, Result};
use lexiforge_common::{PronunciationMode, Style};
use std::path::{Path, PathBuf};

use crate::config::LEXIFORGE_DIR;
use crate::lexicon_config::{CONFIG_FILE, LexiconToml};

/// Result of initializing a lexiforge project.
#[derive(Debug)]
pub struct InitResult {
    pub lexiforge_dir: PathBuf,
    /// False when a `lexicon.toml` already existed and was left untouched
    pub created: bool,
}

/// Initialize a language in `project_dir`.
///
/// An existing `lexicon.toml` is never overwritten: the style is fixed for
/// the lifetime of a language.
pub fn init_project(
    project_dir: &Path,
    name: &str,
    style: Style,
    pronunciation: PronunciationMode,
) -> Result<InitResult> {
    if name.trim().is_empty() {
        anyhow::bail!("Language name must not be empty");
    }

    let lexiforge_dir = project_dir.join(LEXIFORGE_DIR);
    for dir in [
        lexiforge_dir.clone(),
        lexiforge_dir.join("dictionaries"),
        lexiforge_dir.join("logs"),
    ] {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }

    let config_path = lexiforge_dir.join(CONFIG_FILE);
    if config_path.exists() {
        return Ok(InitResult {
            lexiforge_dir,
            created: false,
        });
    }

    let mut toml = LexiconToml::default();
    toml.language.name = name.trim().to_string();
    toml.language.style = style;
    toml.language.pronunciation = pronunciation;
    toml.save(&config_path)?;

    Ok(InitResult {
        lexiforge_dir,
        created: true,
    })
}

pub fn is_initialized(project_dir: &Path) -> bool {
    project_dir.join(LEXIFORGE_DIR).join(CONFIG_FILE).exists()
}
