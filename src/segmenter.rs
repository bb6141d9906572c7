use std::sync::LazyLock;

use regex::Regex;

use crate::clean::clean_text;
use crate::constants::{fallback_pattern, trim_space};
use crate::dictionary::Dictionary;

static FALLBACK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&fallback_pattern()).expect("fallback pattern is valid"));

/// Greedy longest-match segmenter over a fixed dictionary.
///
/// Holds no mutable state, so one instance can be shared freely between
/// threads.
pub struct KhmerSegmenter {
    dictionary: Dictionary,
}

impl KhmerSegmenter {
    pub fn new(dictionary: Dictionary) -> Self {
        KhmerSegmenter { dictionary }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn segment(&self, text: &str) -> Vec<String> {
        segment(text, &self.dictionary)
    }

    /// Untrimmed spans consumed while scanning text that has already been
    /// passed through [`clean_text`]. Their concatenation is `cleaned`.
    pub fn spans<'a>(&'a self, cleaned: &'a str) -> Spans<'a> {
        Spans::new(cleaned, &self.dictionary)
    }
}

/// Segments `text` against `dictionary`, preferring the longest dictionary entry
/// at each position and falling back to script runs otherwise.
///
/// Tokens are trimmed; spans that trim to nothing are dropped.
pub fn segment(text: &str, dictionary: &Dictionary) -> Vec<String> {
    let cleaned = clean_text(text);
    Spans::new(&cleaned, dictionary)
        .map(trim_space)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Iterator over the raw spans of the longest-match scan.
pub struct Spans<'a> {
    rest: &'a str,
    dictionary: &'a Dictionary,
}

impl<'a> Spans<'a> {
    pub fn new(cleaned: &'a str, dictionary: &'a Dictionary) -> Self {
        Spans {
            rest: cleaned,
            dictionary,
        }
    }

    #[inline]
    fn next_span_len(&self) -> usize {
        if let Some(len) = self.dictionary.longest_prefix(self.rest) {
            return len;
        }
        match FALLBACK.find(self.rest) {
            Some(m) if m.end() > 0 => m.end(),
            _ => self.rest.chars().next().map_or(self.rest.len(), char::len_utf8),
        }
    }
}

impl<'a> Iterator for Spans<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let (span, rest) = self.rest.split_at(self.next_span_len());
        self.rest = rest;
        Some(span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(words: &[&str]) -> Dictionary {
        words.iter().collect()
    }

    #[test]
    fn fallback_consumes_newline_as_whitespace() {
        let empty = Dictionary::new();
        let spans: Vec<&str> = Spans::new("ក\n\nx", &empty).collect();
        assert_eq!(spans, vec!["ក", "\n\n", "x"]);
    }

    #[test]
    fn fallback_takes_single_symbol() {
        let empty = Dictionary::new();
        let spans: Vec<&str> = Spans::new("$$ab", &empty).collect();
        assert_eq!(spans, vec!["$", "$", "ab"]);
    }

    #[test]
    fn dictionary_hit_wins_over_fallback_run() {
        let d = dict(&["ខ្ញុំ"]);
        let spans: Vec<&str> = Spans::new("ខ្ញុំស្រលាញ់", &d).collect();
        assert_eq!(spans, vec!["ខ្ញុំ", "ស្រលាញ់"]);
    }
}
