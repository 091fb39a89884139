//! BERT weight tensors, loaded once and shared read-only by every forward pass.
//!
//! Tensor names follow the Hugging Face layout. Checkpoints saved from
//! `BertForMaskedLM` and friends prefix everything with `bert.`; older ones name
//! LayerNorm parameters `gamma`/`beta`. Both variants are accepted.
//!
//! Weights are plain tensors (never `Var`s), so no gradient graph is recorded.

use std::path::Path;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;

use super::config::BertConfig;
use super::files::WeightsFormat;

/// LayerNorm scale and shift.
#[derive(Debug, Clone)]
pub struct LayerNormWeights {
    pub weight: Tensor,
    pub bias: Tensor,
}

/// Word, position and token-type lookup tables.
#[derive(Debug, Clone)]
pub struct EmbeddingWeights {
    pub word_embeddings: Tensor,
    pub position_embeddings: Tensor,
    pub token_type_embeddings: Tensor,
    pub layer_norm: LayerNormWeights,
}

/// Self-attention projections plus the output dense + LayerNorm.
#[derive(Debug, Clone)]
pub struct AttentionWeights {
    pub query_weight: Tensor,
    pub query_bias: Tensor,
    pub key_weight: Tensor,
    pub key_bias: Tensor,
    pub value_weight: Tensor,
    pub value_bias: Tensor,
    pub output_weight: Tensor,
    pub output_bias: Tensor,
    pub layer_norm: LayerNormWeights,
}

/// Intermediate and output projections plus LayerNorm.
#[derive(Debug, Clone)]
pub struct FfnWeights {
    pub intermediate_weight: Tensor,
    pub intermediate_bias: Tensor,
    pub output_weight: Tensor,
    pub output_bias: Tensor,
    pub layer_norm: LayerNormWeights,
}

#[derive(Debug, Clone)]
pub struct EncoderLayerWeights {
    pub attention: AttentionWeights,
    pub ffn: FfnWeights,
}

/// Complete encoder (the pooler head is not needed and not loaded).
#[derive(Debug, Clone)]
pub struct BertWeights {
    pub config: BertConfig,
    pub embeddings: EmbeddingWeights,
    pub encoder_layers: Vec<EncoderLayerWeights>,
    device: Device,
}

impl BertWeights {
    /// Load weights from a checkpoint file onto `device` as F32.
    pub fn load(
        path: &Path,
        format: WeightsFormat,
        config: BertConfig,
        device: &Device,
    ) -> candle_core::Result<Self> {
        let vb = match format {
            // SAFETY: the file is memory-mapped read-only and not modified
            // while the weights are alive.
            WeightsFormat::SafeTensors => unsafe {
                VarBuilder::from_mmaped_safetensors(&[path], DType::F32, device)?
            },
            WeightsFormat::PyTorch => VarBuilder::from_pth(path, DType::F32, device)?,
        };
        Self::from_var_builder(vb, config, device)
    }

    /// Build from any `VarBuilder`.
    pub fn from_var_builder(
        vb: VarBuilder,
        config: BertConfig,
        device: &Device,
    ) -> candle_core::Result<Self> {
        let vb = if vb.contains_tensor("bert.embeddings.word_embeddings.weight") {
            vb.pp("bert")
        } else {
            vb
        };

        let embeddings = load_embeddings(vb.pp("embeddings"), &config)?;
        let encoder_layers = (0..config.num_hidden_layers)
            .map(|i| load_encoder_layer(vb.pp(format!("encoder.layer.{}", i)), &config))
            .collect::<candle_core::Result<Vec<_>>>()?;

        Ok(Self {
            config,
            embeddings,
            encoder_layers,
            device: device.clone(),
        })
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Total number of scalar parameters.
    pub fn param_count(&self) -> usize {
        let ln = |l: &LayerNormWeights| l.weight.elem_count() + l.bias.elem_count();
        let e = &self.embeddings;
        let mut total = e.word_embeddings.elem_count()
            + e.position_embeddings.elem_count()
            + e.token_type_embeddings.elem_count()
            + ln(&e.layer_norm);

        for layer in &self.encoder_layers {
            let a = &layer.attention;
            let f = &layer.ffn;
            total += [
                &a.query_weight,
                &a.query_bias,
                &a.key_weight,
                &a.key_bias,
                &a.value_weight,
                &a.value_bias,
                &a.output_weight,
                &a.output_bias,
                &f.intermediate_weight,
                &f.intermediate_bias,
                &f.output_weight,
                &f.output_bias,
            ]
            .iter()
            .map(|t| t.elem_count())
            .sum::<usize>()
                + ln(&a.layer_norm)
                + ln(&f.layer_norm);
        }
        total
    }
}

fn load_layer_norm(vb: VarBuilder, size: usize) -> candle_core::Result<LayerNormWeights> {
    match (vb.get(size, "weight"), vb.get(size, "bias")) {
        (Ok(weight), Ok(bias)) => Ok(LayerNormWeights { weight, bias }),
        (Err(err), _) | (_, Err(err)) => match (vb.get(size, "gamma"), vb.get(size, "beta")) {
            (Ok(weight), Ok(bias)) => Ok(LayerNormWeights { weight, bias }),
            _ => Err(err),
        },
    }
}

fn load_embeddings(vb: VarBuilder, config: &BertConfig) -> candle_core::Result<EmbeddingWeights> {
    let h = config.hidden_size;
    Ok(EmbeddingWeights {
        word_embeddings: vb.get((config.vocab_size, h), "word_embeddings.weight")?,
        position_embeddings: vb.get(
            (config.max_position_embeddings, h),
            "position_embeddings.weight",
        )?,
        token_type_embeddings: vb.get((config.type_vocab_size, h), "token_type_embeddings.weight")?,
        layer_norm: load_layer_norm(vb.pp("LayerNorm"), h)?,
    })
}

fn load_encoder_layer(
    vb: VarBuilder,
    config: &BertConfig,
) -> candle_core::Result<EncoderLayerWeights> {
    let h = config.hidden_size;
    let i = config.intermediate_size;

    let attn = vb.pp("attention");
    let this = attn.pp("self");
    let out = attn.pp("output");
    let attention = AttentionWeights {
        query_weight: this.get((h, h), "query.weight")?,
        query_bias: this.get(h, "query.bias")?,
        key_weight: this.get((h, h), "key.weight")?,
        key_bias: this.get(h, "key.bias")?,
        value_weight: this.get((h, h), "value.weight")?,
        value_bias: this.get(h, "value.bias")?,
        output_weight: out.get((h, h), "dense.weight")?,
        output_bias: out.get(h, "dense.bias")?,
        layer_norm: load_layer_norm(out.pp("LayerNorm"), h)?,
    };

    let ffn = FfnWeights {
        intermediate_weight: vb.get((i, h), "intermediate.dense.weight")?,
        intermediate_bias: vb.get(i, "intermediate.dense.bias")?,
        output_weight: vb.get((h, i), "output.dense.weight")?,
        output_bias: vb.get(h, "output.dense.bias")?,
        layer_norm: load_layer_norm(vb.pp("output").pp("LayerNorm"), h)?,
    };

    Ok(EncoderLayerWeights { attention, ffn })
}
