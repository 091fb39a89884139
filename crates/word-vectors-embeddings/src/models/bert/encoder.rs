//! BERT encoder layer and stack.

use candle_core::Tensor;

use crate::error::{EmbeddingError, EmbeddingResult};

use super::attention::self_attention_forward;
use super::config::BertConfig;
use super::constants::MASKED_ATTENTION_BIAS;
use super::ffn::ffn_forward;
use super::layer_norm::layer_norm;
use super::weights::{BertWeights, EncoderLayerWeights};

/// Run single encoder layer forward pass.
pub fn encoder_layer_forward(
    hidden_states: &Tensor,
    layer: &EncoderLayerWeights,
    attention_bias: &Tensor,
    config: &BertConfig,
    layer_idx: usize,
) -> EmbeddingResult<Tensor> {
    let attention_output = self_attention_forward(
        hidden_states,
        &layer.attention,
        attention_bias,
        config,
        layer_idx,
    )?;

    // Add & Norm (attention)
    let attention_output = (hidden_states + &attention_output).map_err(|e| {
        EmbeddingError::inference(&format!("layer {} attention residual", layer_idx), e)
    })?;
    let attention_output = layer_norm(
        &attention_output,
        &layer.attention.layer_norm,
        config.layer_norm_eps,
    )?;

    let ffn_output = ffn_forward(&attention_output, &layer.ffn, config, layer_idx)?;

    // Add & Norm (FFN)
    let output = (&attention_output + &ffn_output).map_err(|e| {
        EmbeddingError::inference(&format!("layer {} FFN residual", layer_idx), e)
    })?;
    layer_norm(&output, &layer.ffn.layer_norm, config.layer_norm_eps)
}

/// Run all encoder layers over `embeddings` `[1, seq, hidden]`.
///
/// `attention_mask` is `[1, seq]` with 1.0 for real tokens, 0.0 for padding.
pub fn run_encoder_layers(
    embeddings: Tensor,
    attention_mask: &Tensor,
    weights: &BertWeights,
) -> EmbeddingResult<Tensor> {
    // [batch, seq] -> [batch, 1, 1, seq]; 1.0 -> 0.0, 0.0 -> -10000.0
    let attention_bias = attention_mask
        .unsqueeze(1)
        .and_then(|m| m.unsqueeze(2))
        .and_then(|m| m.affine(-1.0, 1.0))
        .and_then(|m| m * MASKED_ATTENTION_BIAS)
        .map_err(|e| EmbeddingError::inference("attention mask", e))?;

    let mut hidden_states = embeddings;
    for (layer_idx, layer) in weights.encoder_layers.iter().enumerate() {
        hidden_states = encoder_layer_forward(
            &hidden_states,
            layer,
            &attention_bias,
            &weights.config,
            layer_idx,
        )?;
    }

    Ok(hidden_states)
}
