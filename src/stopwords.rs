use std::collections::HashSet;
use std::fs::File;
use std::io;
use std::path::Path;

use tracing::warn;

use crate::constants::trim_space;
use crate::error::{Error, Result};

/// Loads stop words from a CSV file, taking the trimmed first field of each
/// row. Missing or unreadable files are logged and yield whatever was read
/// before the failure, which for a missing file is the empty set.
pub fn load_stop_words(path: &Path) -> HashSet<String> {
    let mut stop_words = HashSet::new();
    if let Err(err) = read_stop_words(path, &mut stop_words) {
        warn!(path = %path.display(), %err, "failed to load stop words");
    }
    stop_words
}

/// Like [`load_stop_words`] but reports the failure to the caller instead of
/// logging it.
pub fn try_load_stop_words(path: &Path) -> Result<HashSet<String>> {
    let mut stop_words = HashSet::new();
    read_stop_words(path, &mut stop_words)?;
    Ok(stop_words)
}

fn read_stop_words(path: &Path, stop_words: &mut HashSet<String>) -> Result<()> {
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => Error::StopWordsNotFound(path.to_path_buf()),
        _ => Error::Io(err),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    for record in reader.records() {
        let record = record?;
        if let Some(word) = record.get(0).map(trim_space) {
            if !word.is_empty() {
                stop_words.insert(word.to_string());
            }
        }
    }
    Ok(())
}

/// Drops every token found in `stop_words`, keeping the order of the rest.
pub fn filter_stop_words(tokens: Vec<String>, stop_words: &HashSet<String>) -> Vec<String> {
    if stop_words.is_empty() {
        return tokens;
    }
    tokens
        .into_iter()
        .filter(|token| !stop_words.contains(token))
        .collect()
}
