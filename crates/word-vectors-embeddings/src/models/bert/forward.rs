//! Full forward pass for one word.
//!
//! 1. Tokenize with special tokens (`[CLS] ... [SEP]`)
//! 2. Reject inputs longer than the position-embedding limit
//! 3. Embedding lookup (word + position + token_type) and LayerNorm
//! 4. Transformer encoder layers
//! 5. Mean pooling over the token dimension
//! 6. Dimension and finiteness checks

use candle_core::Tensor;
use tokenizers::Tokenizer;

use crate::error::{EmbeddingError, EmbeddingResult};
use crate::provider::check_embedding;
use crate::types::Embedding;

use super::constants::MAX_SEQUENCE_TOKENS;
use super::embeddings::compute_embeddings;
use super::encoder::run_encoder_layers;
use super::pooling::mean_pool;
use super::weights::BertWeights;

/// Maximum tokens accepted by `weights`, special tokens included.
pub fn max_sequence_len(weights: &BertWeights) -> usize {
    weights
        .config
        .max_position_embeddings
        .min(MAX_SEQUENCE_TOKENS)
}

/// Encode `text` into a single mean-pooled vector of length `hidden_size`.
pub fn forward(text: &str, weights: &BertWeights, tokenizer: &Tokenizer) -> EmbeddingResult<Embedding> {
    let device = weights.device();

    let encoding = tokenizer
        .encode(text, true)
        .map_err(|e| EmbeddingError::Tokenization {
            message: e.to_string(),
        })?;

    let seq_len = encoding.get_ids().len();
    let limit = max_sequence_len(weights);
    if seq_len == 0 {
        return Err(EmbeddingError::Tokenization {
            message: "tokenizer produced no tokens".to_string(),
        });
    }
    if seq_len > limit {
        return Err(EmbeddingError::Tokenization {
            message: format!("{} tokens exceeds limit {}", seq_len, limit),
        });
    }

    let token_ids = encoding.get_ids();
    let type_ids = encoding.get_type_ids();
    let attention_mask: Vec<f32> = encoding
        .get_attention_mask()
        .iter()
        .map(|&m| m as f32)
        .collect();

    let attention_mask = Tensor::from_slice(&attention_mask, (1, seq_len), device)
        .map_err(|e| EmbeddingError::inference("attention_mask tensor", e))?;

    let embeddings = compute_embeddings(token_ids, type_ids, weights, device)?;
    let hidden_states = run_encoder_layers(embeddings, &attention_mask, weights)?;
    let embedding = mean_pool(&hidden_states, &attention_mask)?;

    check_embedding(&embedding, weights.config.hidden_size)?;
    Ok(embedding)
}

