// Khmer Unicode ranges, written as regex class fragments so every pattern in the
// crate draws from the same definitions.

/// Primary Khmer block, U+1780..=U+17FF.
pub const KHMER_BLOCK: &str = r"\x{1780}-\x{17FF}";

/// Consonants and independent vowels that can start a syllable.
pub const SYLLABLE_BASE: &str = r"\x{1780}-\x{17A2}";

/// Dependent vowel signs and diacritics that attach to a syllable base.
pub const SYLLABLE_MARKS: &str = r"\x{17B6}-\x{17D3}";

/// Unicode White_Space plus the ASCII information separators U+001C..=U+001F.
pub const WHITESPACE: &str = r"\s\x{1C}-\x{1F}";

pub const ZERO_WIDTH_SPACE: char = '\u{200B}';
pub const KHAN: char = '\u{17D4}';
pub const FULL_STOP: char = '.';

/// Fallback used when no dictionary entry starts at the cursor. Alternatives are
/// tried left to right: Khmer run, whitespace run, ASCII alnum run, one char.
pub fn fallback_pattern() -> String {
    format!(r"\A(?:[{KHMER_BLOCK}]+|[{WHITESPACE}]+|[a-zA-Z0-9]+|.)")
}

/// Same set as [`WHITESPACE`], for trimming.
#[inline]
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1C}'..='\u{1F}').contains(&c)
}

/// Trims [`is_space`] characters from both ends.
#[inline]
pub fn trim_space(s: &str) -> &str {
    s.trim_matches(is_space)
}

pub fn syllable_pattern() -> String {
    format!(r"[{SYLLABLE_BASE}][{SYLLABLE_MARKS}]*")
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn khmer_block_bounds() {
        let block = Regex::new(&format!("^[{KHMER_BLOCK}]$")).unwrap();
        assert!(block.is_match("ក"));
        assert!(block.is_match("\u{17FF}"));
        assert!(block.is_match("១"));
        assert!(!block.is_match("a"));
        assert!(!block.is_match("\u{19E0}"));
    }

    #[test]
    fn syllable_ranges() {
        let syllable = Regex::new(&format!("^{}$", syllable_pattern())).unwrap();
        assert!(syllable.is_match("\u{17A2}\u{17B6}\u{17D3}"));
        assert!(!syllable.is_match("\u{17A3}"));
        assert!(!syllable.is_match("\u{1780}\u{17D4}"));
    }

    #[test]
    fn whitespace_class_matches_trim_predicate() {
        let space = Regex::new(&format!("^[{WHITESPACE}]$")).unwrap();
        for c in ['\u{1C}', '\u{1F}', ' ', '\t', '\n', '\u{85}', '\u{3000}', 'a', '\u{1B}', 'ក'] {
            assert_eq!(space.is_match(c.encode_utf8(&mut [0; 4])), is_space(c), "{c:?}");
        }
        assert_eq!(trim_space("\u{1C} ក\u{1F}\n"), "ក");
    }

    #[test]
    fn patterns_compile() {
        assert!(Regex::new(&fallback_pattern()).is_ok());
        assert!(Regex::new(&syllable_pattern()).is_ok());
    }
}
