//! Stub embedding provider for tests and dry runs.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::error::EmbeddingResult;
use crate::models::bert::{BERT_BASE_HIDDEN_SIZE, MAX_SEQUENCE_TOKENS};
use crate::provider::EmbeddingProvider;
use crate::types::Embedding;

/// Deterministic embedder that needs no model weights.
///
/// Each component is derived from a hash of the word and the component index,
/// so the same word always produces the same vector within a build.
#[derive(Debug, Clone)]
pub struct StubEmbedder {
    dimension: usize,
    model_name: String,
}

impl StubEmbedder {
    /// Create a new stub embedder with specified dimension.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            model_name: "stub-embedder-v1".to_string(),
        }
    }

    fn generate_embedding(&self, word: &str) -> Embedding {
        (0..self.dimension)
            .map(|i| {
                let mut hasher = DefaultHasher::new();
                word.hash(&mut hasher);
                (i as u64).hash(&mut hasher);
                let hash = hasher.finish();

                // Map to [-1.0, 1.0] range
                ((hash as f64 / u64::MAX as f64) * 2.0 - 1.0) as f32
            })
            .collect()
    }
}

impl Default for StubEmbedder {
    fn default() -> Self {
        Self::new(BERT_BASE_HIDDEN_SIZE)
    }
}

impl EmbeddingProvider for StubEmbedder {
    fn embed(&self, word: &str) -> EmbeddingResult<Embedding> {
        Ok(self.generate_embedding(word))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn max_tokens(&self) -> usize {
        MAX_SEQUENCE_TOKENS
    }
}
