//! Core data types: embeddings, the word -> embedding table, and collection results.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Fixed-length vector produced for one word (length = encoder hidden size).
pub type Embedding = Vec<f32>;

/// Mapping from word to embedding.
///
/// Iteration follows first-insertion order. Re-inserting an existing word
/// replaces its embedding in place (last write wins, position kept).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddingTable {
    entries: Vec<(String, Embedding)>,
    index: HashMap<String, usize>,
}

impl EmbeddingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the embedding for `word`.
    ///
    /// Returns the previous embedding if the word was already present.
    pub fn insert(&mut self, word: impl Into<String>, embedding: Embedding) -> Option<Embedding> {
        let word = word.into();
        match self.index.get(&word) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, embedding)),
            None => {
                self.index.insert(word.clone(), self.entries.len());
                self.entries.push((word, embedding));
                None
            }
        }
    }

    pub fn get(&self, word: &str) -> Option<&Embedding> {
        self.index.get(word).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Words in insertion order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(w, _)| w.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Embedding)> {
        self.entries.iter().map(|(w, e)| (w.as_str(), e))
    }
}

impl Serialize for EmbeddingTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (word, embedding) in &self.entries {
            map.serialize_entry(word, embedding)?;
        }
        map.end()
    }
}

/// A word whose embedding could not be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedWord {
    pub word: String,
    pub reason: String,
}

/// Outcome of one pass over the word list.
#[derive(Debug, Clone, Default)]
pub struct CollectionReport {
    /// Successfully encoded words only.
    pub table: EmbeddingTable,
    /// Failures in input order (a word can appear more than once).
    pub failures: Vec<FailedWord>,
}

impl CollectionReport {
    pub fn succeeded(&self) -> usize {
        self.table.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}
