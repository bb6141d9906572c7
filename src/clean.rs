use std::borrow::Cow;

use crate::constants::{FULL_STOP, KHAN, ZERO_WIDTH_SPACE};

/// Prepares raw text for longest-match scanning.
///
/// Zero-width spaces are deleted, then every `.` and every `។` is padded with a
/// space on each side so sentence punctuation always lands in its own span.
/// Text containing none of the three code points is borrowed as-is.
pub fn clean_text(text: &str) -> Cow<'_, str> {
    if !text.contains([ZERO_WIDTH_SPACE, FULL_STOP, KHAN]) {
        return Cow::Borrowed(text);
    }

    let mut cleaned = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            ZERO_WIDTH_SPACE => {}
            FULL_STOP | KHAN => {
                cleaned.push(' ');
                cleaned.push(c);
                cleaned.push(' ');
            }
            c => cleaned.push(c),
        }
    }
    Cow::Owned(cleaned)
}
