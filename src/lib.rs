//! Dictionary-driven word segmentation for Khmer text.
//!
//! [`segment`] splits text greedily on the longest dictionary entry at each
//! position, falling back to Khmer, whitespace and alphanumeric runs when no
//! entry matches. [`syllables`] splits on syllable shape alone.

pub mod capabilities;
pub mod clean;
pub mod constants;
pub mod dictionary;
pub mod error;
pub mod segmenter;
pub mod stopwords;
pub mod syllable;

pub use capabilities::{capabilities, Capabilities, OcrExtractor, PosTagger};
pub use clean::clean_text;
pub use dictionary::Dictionary;
pub use error::{Error, Result};
pub use segmenter::{segment, KhmerSegmenter};
pub use stopwords::{filter_stop_words, load_stop_words, try_load_stop_words};
pub use syllable::syllables;
