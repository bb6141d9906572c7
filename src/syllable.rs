use std::sync::LazyLock;

use regex::Regex;

use crate::constants::syllable_pattern;

static SYLLABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&syllable_pattern()).expect("syllable pattern is valid"));

/// Splits text into syllable-shaped pieces: a consonant or independent vowel
/// plus its trailing vowel signs, with the text between syllables kept as its
/// own pieces. Empty pieces are dropped.
pub fn syllables(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut last = 0;

    for m in SYLLABLE.find_iter(text) {
        if m.start() > last {
            pieces.push(&text[last..m.start()]);
        }
        pieces.push(m.as_str());
        last = m.end();
    }
    if last < text.len() {
        pieces.push(&text[last..]);
    }

    pieces
}
