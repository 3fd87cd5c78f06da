//! Tolerant parsing of enrichment responses.
//!
//! The service answers in free text. We scan it line by line for
//! `KEY: value` markers and ignore everything else:
//!
//! ```text
//! ORIGIN: Latin
//! ROOT: computare, to reckon
//! RELATED: count; compute
//! PERIODS:
//! - Middle French
//! - Early Modern English
//! ```
//!
//! Keys are case-insensitive and may be bulleted or bolded. A bulleted line
//! continues the most recent key unless it starts with a known marker, so
//! `- Note: ...` under EXAMPLES stays an example. Repeated keys accumulate.

use lexiforge_common::{Definition, Etymology};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static KEY_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*•]\s*)?\**([A-Za-z][A-Za-z ]*?)\**\s*:\s*(.*?)\s*$").unwrap()
});

static BULLET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*•]\s*(.+?)\s*$").unwrap());

const ETYMOLOGY_KEYS: [&str; 6] = [
    "ORIGIN",
    "ROOT",
    "DEVELOPMENT",
    "RELATED",
    "MORPHEMES",
    "PERIODS",
];

const DEFINITION_KEYS: [&str; 5] = ["PRIMARY", "SECONDARY", "TECHNICAL", "POS", "EXAMPLES"];

/// A bulleted `Word: text` line only opens a new key when the key is a known marker.
fn is_known_key(raw: &str) -> bool {
    let key = raw.trim().to_ascii_uppercase();
    ETYMOLOGY_KEYS.contains(&key.as_str()) || DEFINITION_KEYS.contains(&key.as_str())
}

/// Raw key → values collected from a response.
#[derive(Debug, Default, PartialEq)]
pub struct Sections {
    values: BTreeMap<String, Vec<String>>,
}

impl Sections {
    pub fn parse(text: &str) -> Self {
        let mut sections = Sections::default();
        let mut current: Option<String> = None;

        for line in text.lines() {
            if let Some(cap) = KEY_LINE_REGEX.captures(line)
                && (!BULLET_REGEX.is_match(line) || current.is_none() || is_known_key(&cap[1]))
            {
                let key = cap[1].trim().to_ascii_uppercase();
                let value = cap[2].trim();
                let entry = sections.values.entry(key.clone()).or_default();
                if !value.is_empty() {
                    entry.push(value.to_string());
                }
                current = Some(key);
            } else if let Some(cap) = BULLET_REGEX.captures(line)
                && let Some(key) = &current
            {
                sections
                    .values
                    .entry(key.clone())
                    .or_default()
                    .push(cap[1].to_string());
            } else if line.trim().is_empty() {
                current = None;
            }
        }
        sections
    }

    fn has_any(&self, keys: &[&str]) -> bool {
        keys.iter()
            .any(|k| self.values.get(*k).is_some_and(|v| !v.is_empty()))
    }

    /// First value for a key, if any.
    pub fn text(&self, key: &str) -> Option<String> {
        self.values.get(key).and_then(|v| v.first()).cloned()
    }

    /// All values for a key, split on `,` and `;`.
    pub fn list(&self, key: &str) -> Vec<String> {
        self.values
            .get(key)
            .into_iter()
            .flatten()
            .flat_map(|v| v.split([',', ';']))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Extract an etymology; `None` when no etymology marker is present.
pub fn parse_etymology(text: &str) -> Option<Etymology> {
    let s = Sections::parse(text);
    if !s.has_any(&ETYMOLOGY_KEYS) {
        return None;
    }
    let fallback = Etymology::fallback();
    Some(Etymology {
        origin: s.text("ORIGIN").unwrap_or(fallback.origin),
        root: s.text("ROOT").unwrap_or(fallback.root),
        development: s.text("DEVELOPMENT").unwrap_or_default(),
        related: s.list("RELATED"),
        morphemes: s.list("MORPHEMES"),
        periods: s.list("PERIODS"),
    })
}

/// Extract a definition; `None` when no definition marker is present.
pub fn parse_definition(word: &str, text: &str) -> Option<Definition> {
    let s = Sections::parse(text);
    if !s.has_any(&DEFINITION_KEYS) {
        return None;
    }
    Some(Definition {
        primary: s
            .text("PRIMARY")
            .unwrap_or_else(|| Definition::placeholder(word).primary),
        secondary: s.list("SECONDARY"),
        technical: s.text("TECHNICAL"),
        part_of_speech: s.text("POS").map(|p| p.to_ascii_lowercase()),
        examples: s.values.get("EXAMPLES").cloned().unwrap_or_default(),
    })
}
