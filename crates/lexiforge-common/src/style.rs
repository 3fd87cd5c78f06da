use serde::{Deserialize, Serialize};

/// Rule set governing how source words become constructed words.
///
/// A language picks one style when it is created and keeps it for its
/// whole lifetime; reconstruction re-applies the style in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// Weight-driven consonant pairing with optional vowel doubling
    #[default]
    Default,
    /// Voicing shifts inside the root only
    ConsonantShift,
    /// Non-dominant vowels pulled into the dominant class
    VowelHarmony,
    /// Root middle character doubled
    MorphemeEmphasis,
    /// Consonant clusters simplified and repeats collapsed
    PhoneticLogic,
}

impl Style {
    pub const ALL: [Style; 5] = [
        Style::Default,
        Style::ConsonantShift,
        Style::VowelHarmony,
        Style::MorphemeEmphasis,
        Style::PhoneticLogic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Style::Default => "default",
            Style::ConsonantShift => "consonant_shift",
            Style::VowelHarmony => "vowel_harmony",
            Style::MorphemeEmphasis => "morpheme_emphasis",
            Style::PhoneticLogic => "phonetic_logic",
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Style {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Style::ALL
            .into_iter()
            .find(|style| style.as_str() == normalized)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Invalid style '{}'. Valid values: default, consonant_shift, vowel_harmony, morpheme_emphasis, phonetic_logic",
                    s
                )
            })
    }
}

/// How pronunciations are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PronunciationMode {
    /// Phonetic symbols between slashes, e.g. `/kɔmbuder/`
    #[default]
    Symbolic,
    /// Respelling with plain Latin letters
    Plain,
}

impl std::fmt::Display for PronunciationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PronunciationMode::Symbolic => write!(f, "symbolic"),
            PronunciationMode::Plain => write!(f, "plain"),
        }
    }
}

impl std::str::FromStr for PronunciationMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "symbolic" => Ok(PronunciationMode::Symbolic),
            "plain" => Ok(PronunciationMode::Plain),
            _ => anyhow::bail!(
                "Invalid pronunciation mode '{}'. Valid values: symbolic, plain",
                s
            ),
        }
    }
}
