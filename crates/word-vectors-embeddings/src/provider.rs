//! Embedding provider trait.
//!
//! ```text
//! EmbeddingProvider (trait)
//! ├── embed(&str) -> EmbeddingResult<Embedding>
//! ├── embed_batch(&[&str]) -> Vec<EmbeddingResult<Embedding>>
//! ├── dimension() -> usize
//! ├── model_name() -> &str
//! └── max_tokens() -> usize
//!
//! BertEmbedder  (pretrained encoder, mean pooled)
//! StubEmbedder  (deterministic hashing, no weights)
//! ```

use crate::error::{EmbeddingError, EmbeddingResult};
use crate::types::Embedding;

/// Converts a word into a fixed-length vector.
///
/// Implementations hold their model state read-only; `embed` never mutates
/// shared state, so one provider serves a whole run.
pub trait EmbeddingProvider: Send + Sync {
    /// Generate the embedding for a single word.
    ///
    /// Errors affect only this word; callers decide whether to continue.
    fn embed(&self, word: &str) -> EmbeddingResult<Embedding>;

    /// Generate embeddings for multiple words, one result per word.
    ///
    /// Default implementation calls `embed` for each word so that a failing
    /// word never takes its neighbours down with it.
    fn embed_batch(&self, words: &[&str]) -> Vec<EmbeddingResult<Embedding>> {
        words.iter().map(|word| self.embed(word)).collect()
    }

    /// Output dimension of embeddings.
    fn dimension(&self) -> usize;

    /// Model name/identifier.
    fn model_name(&self) -> &str;

    /// Maximum input token count (longer inputs fail).
    fn max_tokens(&self) -> usize;
}

impl<P: EmbeddingProvider + ?Sized> EmbeddingProvider for Box<P> {
    fn embed(&self, word: &str) -> EmbeddingResult<Embedding> {
        (**self).embed(word)
    }

    fn embed_batch(&self, words: &[&str]) -> Vec<EmbeddingResult<Embedding>> {
        (**self).embed_batch(words)
    }

    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    fn max_tokens(&self) -> usize {
        (**self).max_tokens()
    }
}

/// Reject vectors of the wrong length or containing NaN/inf.
pub fn check_embedding(embedding: &[f32], expected: usize) -> EmbeddingResult<()> {
    if embedding.len() != expected {
        return Err(EmbeddingError::InvalidDimension {
            expected,
            actual: embedding.len(),
        });
    }
    if let Some(index) = embedding.iter().position(|v| !v.is_finite()) {
        return Err(EmbeddingError::NonFiniteEmbedding { index });
    }
    Ok(())
}
