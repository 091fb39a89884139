//! Mean pooling over the token dimension.

use candle_core::Tensor;

use crate::error::{EmbeddingError, EmbeddingResult};
use crate::types::Embedding;

/// Average `hidden_states` `[1, seq, hidden]` over real tokens.
///
/// Padding positions (mask 0.0) are excluded. For a single unpadded sequence
/// the mask is all ones and this is the plain mean over every token,
/// `[CLS]` and `[SEP]` included. The result is not normalized.
pub fn mean_pool(hidden_states: &Tensor, attention_mask: &Tensor) -> EmbeddingResult<Embedding> {
    let err = |step: &'static str| {
        move |e: candle_core::Error| EmbeddingError::inference(&format!("mean pool {}", step), e)
    };

    let mask_expanded = attention_mask
        .unsqueeze(2)
        .map_err(err("mask expand"))?
        .broadcast_as(hidden_states.shape())
        .map_err(err("mask broadcast"))?;

    let sum_hidden = (hidden_states * mask_expanded)
        .map_err(err("masked multiply"))?
        .sum(1)
        .map_err(err("sum hidden"))?;

    let token_count = attention_mask.sum_keepdim(1).map_err(err("mask sum"))?;

    sum_hidden
        .broadcast_div(&token_count)
        .map_err(err("div"))?
        .flatten_all()
        .map_err(err("flatten output"))?
        .to_vec1()
        .map_err(err("to_vec1"))
}
