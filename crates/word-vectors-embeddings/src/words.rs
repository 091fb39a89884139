//! Word source: a newline-delimited text file, one word per line.
//!
//! Every line is kept, in file order, with surrounding whitespace removed.
//! Lines end at `\n`, `\r\n` or a lone `\r`. Blank lines become empty-string
//! words; nothing is filtered.

use std::fs;
use std::path::Path;

use crate::error::{EmbeddingError, EmbeddingResult};

/// Read `path` into an ordered list of trimmed words.
///
/// # Errors
/// - `EmbeddingError::Io` if the file is missing, unreadable or not UTF-8
pub fn load_words(path: impl AsRef<Path>) -> EmbeddingResult<Vec<String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| EmbeddingError::io(path, e))?;
    let words = parse_words(&text);

    tracing::debug!(
        target: "word_vectors::words",
        path = %path.display(),
        count = words.len(),
        "Loaded word list"
    );
    Ok(words)
}

/// Same rules as [`load_words`], applied to in-memory text.
pub fn parse_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let (line, tail) = match rest.find(|c: char| c == '\n' || c == '\r') {
            Some(end) if rest[end..].starts_with("\r\n") => (&rest[..end], &rest[end + 2..]),
            Some(end) => (&rest[..end], &rest[end + 1..]),
            None => (rest, ""),
        };
        words.push(line.trim().to_string());
        rest = tail;
    }
    words
}
