//! Dense projection shared by attention and FFN blocks.

use candle_core::Tensor;

use crate::error::{EmbeddingError, EmbeddingResult};

/// `x @ weight.T + bias` for `x` of shape `[batch, seq, in]` and a
/// Hugging Face style `weight` of shape `[out, in]`.
pub fn linear(x: &Tensor, weight: &Tensor, bias: &Tensor, what: &str) -> EmbeddingResult<Tensor> {
    let err = |step: &str| {
        let context = format!("{} {}", what, step);
        move |e: candle_core::Error| EmbeddingError::inference(&context, e)
    };

    let (batch_size, seq_len, in_dim) = x.dims3().map_err(err("get dims"))?;
    let out_dim = weight.dim(0).map_err(err("weight dims"))?;

    // Flatten for matmul: [batch*seq, in]
    let flat = x
        .reshape((batch_size * seq_len, in_dim))
        .map_err(err("flatten"))?;

    flat.matmul(&weight.t().map_err(err("transpose"))?)
        .map_err(err("matmul"))?
        .broadcast_add(bias)
        .map_err(err("bias"))?
        .reshape((batch_size, seq_len, out_dim))
        .map_err(err("reshape"))
}
