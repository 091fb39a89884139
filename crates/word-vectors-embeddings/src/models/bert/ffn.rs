//! Feed-forward block: intermediate -> activation -> output.

use candle_core::Tensor;

use crate::error::{EmbeddingError, EmbeddingResult};

use super::config::{BertConfig, HiddenAct};
use super::linear::linear;
use super::weights::FfnWeights;

/// Run FFN forward pass. Residual and LayerNorm are applied by the caller.
pub fn ffn_forward(
    hidden_states: &Tensor,
    ffn: &FfnWeights,
    config: &BertConfig,
    layer_idx: usize,
) -> EmbeddingResult<Tensor> {
    let what = format!("layer {} FFN", layer_idx);

    let intermediate = linear(
        hidden_states,
        &ffn.intermediate_weight,
        &ffn.intermediate_bias,
        &what,
    )?;

    let activated = match config.hidden_act {
        HiddenAct::Gelu => intermediate.gelu_erf(),
        HiddenAct::GeluNew => intermediate.gelu(),
        HiddenAct::Relu => intermediate.relu(),
    }
    .map_err(|e| EmbeddingError::inference(&format!("{} activation", what), e))?;

    linear(&activated, &ffn.output_weight, &ffn.output_bias, &what)
}
