//! Multi-head self-attention for one encoder layer.

use candle_core::Tensor;

use crate::error::{EmbeddingError, EmbeddingResult};

use super::config::BertConfig;
use super::linear::linear;
use super::weights::AttentionWeights;

/// Run self-attention and the attention output projection.
///
/// `attention_bias` is additive, shaped `[batch, 1, 1, seq_len]`.
/// Residual and LayerNorm are applied by the caller.
pub fn self_attention_forward(
    hidden_states: &Tensor,
    attn: &AttentionWeights,
    attention_bias: &Tensor,
    config: &BertConfig,
    layer_idx: usize,
) -> EmbeddingResult<Tensor> {
    let err = |step: &str| {
        let context = format!("layer {} attention {}", layer_idx, step);
        move |e: candle_core::Error| EmbeddingError::inference(&context, e)
    };

    let (batch_size, seq_len, hidden_size) = hidden_states.dims3().map_err(err("get dims"))?;
    let num_heads = config.num_attention_heads;
    let head_dim = config.head_dim();

    // [batch, seq, hidden] -> [batch, heads, seq, head_dim]
    let split_heads = |x: Tensor, what: &str| -> EmbeddingResult<Tensor> {
        x.reshape((batch_size, seq_len, num_heads, head_dim))
            .map_err(err(&format!("{} reshape", what)))?
            .transpose(1, 2)
            .map_err(err(&format!("{} transpose", what)))?
            .contiguous()
            .map_err(err(&format!("{} contiguous", what)))
    };

    let what = format!("layer {} attention", layer_idx);
    let query = split_heads(
        linear(hidden_states, &attn.query_weight, &attn.query_bias, &what)?,
        "query",
    )?;
    let key = split_heads(
        linear(hidden_states, &attn.key_weight, &attn.key_bias, &what)?,
        "key",
    )?;
    let value = split_heads(
        linear(hidden_states, &attn.value_weight, &attn.value_bias, &what)?,
        "value",
    )?;

    let key_t = key
        .t()
        .map_err(err("key transpose"))?
        .contiguous()
        .map_err(err("key contiguous"))?;

    let scores = (query.matmul(&key_t).map_err(err("scores matmul"))?
        / (head_dim as f64).sqrt())
    .map_err(err("scores scale"))?
    .broadcast_add(attention_bias)
    .map_err(err("mask add"))?;

    let probs = candle_nn::ops::softmax_last_dim(&scores).map_err(err("softmax"))?;

    let context = probs
        .matmul(&value)
        .map_err(err("context matmul"))?
        .transpose(1, 2)
        .map_err(err("context transpose"))?
        .contiguous()
        .map_err(err("context contiguous"))?
        .reshape((batch_size, seq_len, hidden_size))
        .map_err(err("context reshape"))?;

    linear(&context, &attn.output_weight, &attn.output_bias, &what)
}
