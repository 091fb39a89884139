//! LayerNorm over the hidden dimension.

use candle_core::{Tensor, D};

use crate::error::{EmbeddingError, EmbeddingResult};

use super::weights::LayerNormWeights;

/// Apply LayerNorm: (x - mean) / sqrt(var + eps) * weight + bias
pub fn layer_norm(x: &Tensor, ln: &LayerNormWeights, eps: f64) -> EmbeddingResult<Tensor> {
    let err = |step: &str| {
        let context = format!("LayerNorm {}", step);
        move |e: candle_core::Error| EmbeddingError::inference(&context, e)
    };

    let mean = x.mean_keepdim(D::Minus1).map_err(err("mean"))?;
    let x_centered = x.broadcast_sub(&mean).map_err(err("center"))?;
    let var = x_centered
        .sqr()
        .map_err(err("sqr"))?
        .mean_keepdim(D::Minus1)
        .map_err(err("var mean"))?;
    let std = (var + eps)
        .map_err(err("var add eps"))?
        .sqrt()
        .map_err(err("sqrt"))?;

    x_centered
        .broadcast_div(&std)
        .map_err(err("div"))?
        .broadcast_mul(&ln.weight)
        .map_err(err("scale"))?
        .broadcast_add(&ln.bias)
        .map_err(err("bias"))
}
