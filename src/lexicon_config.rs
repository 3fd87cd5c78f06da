//! Language configuration read from `.lexiforge/lexicon.toml`.
//!
//! Settings are layered file → environment → CLI. Every field has a
//! default, so a missing file or an empty section is valid.
//!
//! # Configuration File Format
//!
//! ```toml
//! [language]
//! name = "Velari"
//! style = "consonant_shift"
//! pronunciation = "symbolic"
//!
//! [randomness]
//! seed = 0
//! variety = false
//!
//! [batch]
//! save_interval = 25
//! batch_size_hint = 500
//! pausable = true
//!
//! [enrichment]
//! enabled = false
//! endpoint = "http://127.0.0.1:8787/enrich"
//! timeout_secs = 30
//!
//! [analysis]
//! min_consistency = 70.0
//! growth_ratio = 0.10
//! size_threshold = 50
//! conflict_threshold = 3
//! ```

use anyhow::{Context, Result};
use lexiforge_common::{PronunciationMode, Style};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::analysis::AnalysisThresholds;
use crate::transform::Randomness;

/// Name of the config file inside the `.lexiforge` directory.
pub const CONFIG_FILE: &str = "lexicon.toml";

/// Overrides the enrichment endpoint and enables enrichment.
pub const ENV_ENDPOINT: &str = "LEXIFORGE_ENRICHMENT_ENDPOINT";
/// Overrides the randomness seed.
pub const ENV_SEED: &str = "LEXIFORGE_SEED";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageSection {
    #[serde(default = "default_language_name")]
    pub name: String,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub pronunciation: PronunciationMode,
}

fn default_language_name() -> String {
    "Unnamed".to_string()
}

impl Default for LanguageSection {
    fn default() -> Self {
        Self {
            name: default_language_name(),
            style: Style::default(),
            pronunciation: PronunciationMode::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RandomnessSection {
    #[serde(default)]
    pub seed: u64,
    /// Trade reproducibility for run-to-run variety
    #[serde(default)]
    pub variety: bool,
}

impl RandomnessSection {
    pub fn to_randomness(&self) -> Randomness {
        if self.variety {
            Randomness::Variety
        } else {
            Randomness::Seeded(self.seed)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSection {
    /// Words committed between checkpoints
    #[serde(default = "default_save_interval")]
    pub save_interval: usize,
    /// Expected words per run; larger lists are only logged, never split
    #[serde(default = "default_batch_size_hint")]
    pub batch_size_hint: usize,
    #[serde(default = "default_pausable")]
    pub pausable: bool,
}

fn default_save_interval() -> usize {
    25
}

fn default_batch_size_hint() -> usize {
    500
}

fn default_pausable() -> bool {
    true
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            save_interval: default_save_interval(),
            batch_size_hint: default_batch_size_hint(),
            pausable: default_pausable(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentSection {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8787/enrich".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for EnrichmentSection {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EnrichmentSection {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSection {
    #[serde(default = "default_min_consistency")]
    pub min_consistency: f64,
    #[serde(default = "default_growth_ratio")]
    pub growth_ratio: f64,
    #[serde(default = "default_size_threshold")]
    pub size_threshold: usize,
    #[serde(default = "default_conflict_threshold")]
    pub conflict_threshold: usize,
}

fn default_min_consistency() -> f64 {
    70.0
}

fn default_growth_ratio() -> f64 {
    0.10
}

fn default_size_threshold() -> usize {
    50
}

fn default_conflict_threshold() -> usize {
    3
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            min_consistency: default_min_consistency(),
            growth_ratio: default_growth_ratio(),
            size_threshold: default_size_threshold(),
            conflict_threshold: default_conflict_threshold(),
        }
    }
}

impl AnalysisSection {
    pub fn to_thresholds(&self) -> AnalysisThresholds {
        AnalysisThresholds {
            min_consistency: self.min_consistency,
            growth_ratio: self.growth_ratio,
            size_threshold: self.size_threshold,
            conflict_threshold: self.conflict_threshold,
        }
    }
}

/// The complete lexicon.toml structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconToml {
    #[serde(default)]
    pub language: LanguageSection,
    #[serde(default)]
    pub randomness: RandomnessSection,
    #[serde(default)]
    pub batch: BatchSection,
    #[serde(default)]
    pub enrichment: EnrichmentSection,
    #[serde(default)]
    pub analysis: AnalysisSection,
}

impl LexiconToml {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse lexicon.toml")
    }

    /// Load `.lexiforge/lexicon.toml`, or defaults when it doesn't exist.
    pub fn load_or_default(lexiforge_dir: &Path) -> Result<Self> {
        let path = lexiforge_dir.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize lexicon.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Apply environment overrides through `lookup`; returns warnings for
    /// values that could not be used.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(endpoint) = lookup(ENV_ENDPOINT).filter(|v| !v.trim().is_empty()) {
            self.enrichment.endpoint = endpoint.trim().to_string();
            self.enrichment.enabled = true;
        }

        if let Some(raw) = lookup(ENV_SEED) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => {
                    self.randomness.seed = seed;
                    self.randomness.variety = false;
                }
                Err(_) => warnings.push(format!("Ignoring {}='{}': not a number", ENV_SEED, raw)),
            }
        }

        warnings
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.language.name.trim().is_empty() {
            warnings.push("language.name is empty".to_string());
        }
        if self.batch.save_interval == 0 {
            warnings.push("batch.save_interval is 0; checkpoints will only be written at the end".to_string());
        }
        if self.enrichment.enabled && !self.enrichment.endpoint.starts_with("http") {
            warnings.push(format!(
                "enrichment.endpoint '{}' is not an http(s) URL",
                self.enrichment.endpoint
            ));
        }
        if self.enrichment.timeout_secs == 0 {
            warnings.push("enrichment.timeout_secs is 0; every request will time out".to_string());
        }
        if !(0.0..=100.0).contains(&self.analysis.min_consistency) {
            warnings.push(format!(
                "analysis.min_consistency {} is outside 0-100",
                self.analysis.min_consistency
            ));
        }
        if self.analysis.growth_ratio < 0.0 {
            warnings.push(format!(
                "analysis.growth_ratio {} is negative",
                self.analysis.growth_ratio
            ));
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_empty_file_uses_defaults() {
        let cfg = LexiconToml::parse("").unwrap();
        assert_eq!(cfg.language.style, Style::Default);
        assert_eq!(cfg.batch.save_interval, 25);
        assert!(cfg.batch.pausable);
        assert!(!cfg.enrichment.enabled);
        assert_eq!(cfg.enrichment.timeout_secs, 30);
        assert_eq!(cfg.analysis.to_thresholds(), AnalysisThresholds::default());
        assert_eq!(cfg.randomness.to_randomness(), Randomness::Seeded(0));
    }

    #[test]
    fn test_parse_full_file() {
        let cfg = LexiconToml::parse(
            r#"
[language]
name = "Velari"
style = "vowel_harmony"
pronunciation = "plain"

[randomness]
variety = true

[batch]
save_interval = 10
pausable = false

[enrichment]
enabled = true
endpoint = "http://localhost:9000/e"
timeout_secs = 5

[analysis]
min_consistency = 80.0
"#,
        )
        .unwrap();
        assert_eq!(cfg.language.name, "Velari");
        assert_eq!(cfg.language.style, Style::VowelHarmony);
        assert_eq!(cfg.language.pronunciation, PronunciationMode::Plain);
        assert_eq!(cfg.randomness.to_randomness(), Randomness::Variety);
        assert_eq!(cfg.batch.save_interval, 10);
        assert_eq!(cfg.batch.batch_size_hint, 500);
        assert!(!cfg.batch.pausable);
        assert_eq!(cfg.enrichment.timeout(), Duration::from_secs(5));
        assert_eq!(cfg.analysis.min_consistency, 80.0);
        assert_eq!(cfg.analysis.size_threshold, 50);
    }

    #[test]
    fn test_invalid_style_is_error() {
        assert!(LexiconToml::parse("[language]\nstyle = \"baroque\"").is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let mut cfg = LexiconToml::default();
        cfg.language.name = "Oru".to_string();
        cfg.language.style = Style::PhoneticLogic;
        cfg.save(&dir.path().join(CONFIG_FILE)).unwrap();

        let loaded = LexiconToml::load_or_default(dir.path()).unwrap();
        assert_eq!(loaded.language.name, "Oru");
        assert_eq!(loaded.language.style, Style::PhoneticLogic);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempdir().unwrap();
        let cfg = LexiconToml::load_or_default(dir.path()).unwrap();
        assert_eq!(cfg.language.name, "Unnamed");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_ENDPOINT, "http://enrich.local/api"),
            (ENV_SEED, "42"),
        ]
        .into_iter()
        .collect();
        let mut cfg = LexiconToml::parse("[randomness]\nvariety = true").unwrap();
        let warnings = cfg.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert!(warnings.is_empty());
        assert!(cfg.enrichment.enabled);
        assert_eq!(cfg.enrichment.endpoint, "http://enrich.local/api");
        assert_eq!(cfg.randomness.to_randomness(), Randomness::Seeded(42));
    }

    #[test]
    fn test_env_bad_seed_warns() {
        let mut cfg = LexiconToml::default();
        let warnings = cfg.apply_env(|k| (k == ENV_SEED).then(|| "abc".to_string()));
        assert_eq!(warnings.len(), 1);
        assert_eq!(cfg.randomness.seed, 0);
    }

    #[test]
    fn test_validate() {
        assert!(LexiconToml::default().validate().is_empty());

        let mut cfg = LexiconToml::default();
        cfg.batch.save_interval = 0;
        cfg.enrichment.enabled = true;
        cfg.enrichment.endpoint = "ftp://x".to_string();
        cfg.analysis.min_consistency = 120.0;
        assert_eq!(cfg.validate().len(), 3);
    }
}
