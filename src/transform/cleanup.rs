//! Repeated-character cleanup shared by every style.

/// Replace every run of `min_run` or more identical characters by `keep` copies.
pub fn collapse_runs(chars: &[char], min_run: usize, keep: usize) -> Vec<char> {
    let mut out = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let run = chars[i..].iter().take_while(|&&x| x == c).count();
        let emit = if run >= min_run { keep } else { run };
        out.extend(std::iter::repeat_n(c, emit));
        i += run;
    }
    out
}

/// Shrink a repeated run at either edge of the word to a single character.
pub fn trim_edge_runs(chars: &[char]) -> Vec<char> {
    let Some(&first) = chars.first() else {
        return Vec::new();
    };
    let lead = chars.iter().take_while(|&&c| c == first).count();
    let mut out: Vec<char> = chars[lead - 1..].to_vec();

    if let Some(&last) = out.last() {
        let trail = out.iter().rev().take_while(|&&c| c == last).count();
        out.truncate(out.len() - trail + 1);
    }
    out
}

/// Post-processing applied after any style: long runs drop to two, edge runs to one.
pub fn finalize(chars: &[char]) -> Vec<char> {
    trim_edge_runs(&collapse_runs(chars, 4, 2))
}
