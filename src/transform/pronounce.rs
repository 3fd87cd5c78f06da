//! Pronunciation rendering.

use lexiforge_common::PronunciationMode;

/// Plain-mode digraphs, tried before single characters.
const DIGRAPHS: [(&str, &str); 8] = [
    ("th", "th"),
    ("ch", "ch"),
    ("sh", "sh"),
    ("ph", "f"),
    ("gh", "g"),
    ("ck", "k"),
    ("ng", "ng"),
    ("qu", "kw"),
];

fn symbol(c: char) -> Option<&'static str> {
    Some(match c {
        'a' => "ɑ",
        'e' => "ɛ",
        'i' => "ɪ",
        'o' => "ɔ",
        'u' => "ʊ",
        'c' => "k",
        'j' => "dʒ",
        'q' => "kw",
        'x' => "ks",
        'y' => "j",
        _ => return None,
    })
}

fn plain(c: char) -> Option<&'static str> {
    match c {
        'c' => Some("k"),
        'x' => Some("ks"),
        _ => None,
    }
}

/// Render the pronunciation of a constructed word.
pub fn render(word: &str, mode: PronunciationMode) -> String {
    match mode {
        PronunciationMode::Symbolic => render_symbolic(word),
        PronunciationMode::Plain => render_plain(word),
    }
}

fn render_symbolic(word: &str) -> String {
    let mut out = String::with_capacity(word.len() + 2);
    out.push('/');
    for c in word.chars() {
        match symbol(c) {
            Some(s) => out.push_str(s),
            None => out.push(c),
        }
    }
    out.push('/');
    out
}

fn render_plain(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let mut out = String::with_capacity(word.len());
    let mut i = 0;
    while i < chars.len() {
        if let Some(&next) = chars.get(i + 1)
            && let Some((_, sound)) = DIGRAPHS.iter().find(|(pair, _)| {
                let mut it = pair.chars();
                it.next() == Some(chars[i]) && it.next() == Some(next)
            })
        {
            out.push_str(sound);
            i += 2;
            continue;
        }
        match plain(chars[i]) {
            Some(s) => out.push_str(s),
            None => out.push(chars[i]),
        }
        i += 1;
    }
    out
}
