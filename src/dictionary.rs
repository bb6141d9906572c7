use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use fxhash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::error::Result;

#[derive(Debug, Default)]
struct TrieNode {
    children: FxHashMap<char, u32>, // index into `Dictionary::nodes`
    is_word: bool,
}

const ROOT: usize = 0;

/// Immutable lexicon of known words.
///
/// Words are kept both in a hash set, for exact membership, and in a
/// code-point trie, so the longest entry starting at a position can be found in
/// a single walk instead of probing every substring. Trie nodes live in one
/// flat vector and refer to their children by index.
#[derive(Debug)]
pub struct Dictionary {
    words: FxHashSet<String>,
    nodes: Vec<TrieNode>,
    max_word_length: usize, // in codepoints
}

impl Default for Dictionary {
    fn default() -> Self {
        Dictionary {
            words: FxHashSet::default(),
            nodes: vec![TrieNode::default()],
            max_word_length: 0,
        }
    }
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a word list: one word per line, surrounding whitespace trimmed,
    /// blank lines skipped.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut dictionary = Dictionary::new();
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            dictionary.insert(word);
        }

        debug!(
            path = %path.display(),
            words = dictionary.len(),
            trie_nodes = dictionary.nodes.len(),
            max_word_length = dictionary.max_word_length,
            "dictionary loaded"
        );
        Ok(dictionary)
    }

    fn insert(&mut self, word: &str) {
        if !self.words.insert(word.to_string()) {
            return;
        }

        let mut node = ROOT;
        let mut len = 0;
        for c in word.chars() {
            node = match self.nodes[node].children.get(&c) {
                Some(&child) => child as usize,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.insert(c, child as u32);
                    child
                }
            };
            len += 1;
        }
        self.nodes[node].is_word = true;
        if len > self.max_word_length {
            self.max_word_length = len;
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn max_word_length(&self) -> usize {
        self.max_word_length
    }

    /// Byte length of the longest non-empty entry that is a prefix of `text`.
    ///
    /// An empty entry never matches: it would not advance a cursor.
    #[inline]
    pub fn longest_prefix(&self, text: &str) -> Option<usize> {
        let mut node = &self.nodes[ROOT];
        let mut longest = None;
        for (i, c) in text.char_indices() {
            match node.children.get(&c) {
                Some(&child) => node = &self.nodes[child as usize],
                None => break,
            }
            if node.is_word {
                longest = Some(i + c.len_utf8());
            }
        }
        longest
    }
}

impl<S: AsRef<str>> FromIterator<S> for Dictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut dictionary = Dictionary::new();
        for word in iter {
            dictionary.insert(word.as_ref());
        }
        dictionary
    }
}

impl From<HashSet<String>> for Dictionary {
    fn from(words: HashSet<String>) -> Self {
        words.into_iter().collect()
    }
}
