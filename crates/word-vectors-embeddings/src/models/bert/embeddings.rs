//! Input embeddings: word + position + token_type, then LayerNorm.

use candle_core::{Device, Tensor};

use crate::error::{EmbeddingError, EmbeddingResult};

use super::layer_norm::layer_norm;
use super::weights::BertWeights;

/// Compute initial hidden states `[1, seq_len, hidden]` for one sequence.
pub fn compute_embeddings(
    token_ids: &[u32],
    type_ids: &[u32],
    weights: &BertWeights,
    device: &Device,
) -> EmbeddingResult<Tensor> {
    let config = &weights.config;
    let seq_len = token_ids.len();
    let position_ids: Vec<u32> = (0..seq_len as u32).collect();

    let lookup = |table: &Tensor, ids: &[u32], what: &str| -> EmbeddingResult<Tensor> {
        let ids = Tensor::from_slice(ids, seq_len, device)
            .map_err(|e| EmbeddingError::inference(&format!("{} ids tensor", what), e))?;
        table
            .index_select(&ids, 0)
            .map_err(|e| EmbeddingError::inference(&format!("{} embedding lookup", what), e))?
            .reshape((1, seq_len, config.hidden_size))
            .map_err(|e| EmbeddingError::inference(&format!("{} embedding reshape", what), e))
    };

    let word_embeds = lookup(&weights.embeddings.word_embeddings, token_ids, "word")?;
    let position_embeds = lookup(
        &weights.embeddings.position_embeddings,
        &position_ids,
        "position",
    )?;
    let token_type_embeds = lookup(
        &weights.embeddings.token_type_embeddings,
        type_ids,
        "token_type",
    )?;

    let embeddings = ((word_embeds + position_embeds)
        .map_err(|e| EmbeddingError::inference("embedding add 1", e))?
        + token_type_embeds)
        .map_err(|e| EmbeddingError::inference("embedding add 2", e))?;

    layer_norm(
        &embeddings,
        &weights.embeddings.layer_norm,
        config.layer_norm_eps,
    )
}
