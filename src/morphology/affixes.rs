//! Fixed-priority affix tables.
//!
//! Order matters: the decomposer strips the first entry that matches, so
//! longer affixes sharing a head with shorter ones must come first
//! (`under` before `un`).

/// A known affix with its gloss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affix {
    pub value: &'static str,
    pub meaning: &'static str,
}

const fn affix(value: &'static str, meaning: &'static str) -> Affix {
    Affix { value, meaning }
}

pub const PREFIXES: &[Affix] = &[
    affix("counter", "against"),
    affix("under", "below"),
    affix("inter", "between"),
    affix("super", "above"),
    affix("trans", "across"),
    affix("anti", "opposing"),
    affix("over", "excessive"),
    affix("semi", "half"),
    affix("auto", "self"),
    affix("post", "after"),
    affix("pre", "before"),
    affix("dis", "apart"),
    affix("mis", "wrongly"),
    affix("non", "not"),
    affix("sub", "under"),
    affix("re", "again"),
    affix("un", "not"),
];

pub const SUFFIXES: &[Affix] = &[
    affix("ation", "process of"),
    affix("tion", "act of"),
    affix("sion", "state of"),
    affix("ment", "result of"),
    affix("ness", "quality of being"),
    affix("able", "capable of"),
    affix("ible", "capable of"),
    affix("less", "without"),
    affix("ful", "full of"),
    affix("ous", "having"),
    affix("ive", "tending to"),
    affix("ize", "to make"),
    affix("ise", "to make"),
    affix("ity", "condition of"),
    affix("ing", "ongoing action"),
    affix("ly", "in the manner of"),
    affix("ed", "completed action"),
    affix("al", "relating to"),
];

/// Part of speech suggested by a suffix, if it is a strong signal.
pub fn part_of_speech_for_suffix(suffix: &str) -> Option<&'static str> {
    match suffix {
        "ation" | "tion" | "sion" | "ment" | "ness" | "ity" => Some("noun"),
        "ize" | "ise" | "ing" | "ed" => Some("verb"),
        "ly" => Some("adverb"),
        "able" | "ible" | "less" | "ful" | "ous" | "ive" | "al" => Some("adjective"),
        _ => None,
    }
}
