//! `config.json` of a pretrained BERT checkpoint.

use std::path::Path;

use serde::Deserialize;

use crate::error::{EmbeddingError, EmbeddingResult};

/// Activation used in the feed-forward block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HiddenAct {
    /// Exact (erf) GELU, what BERT checkpoints call `"gelu"`.
    #[default]
    Gelu,
    /// Tanh approximation.
    #[serde(alias = "gelu_pytorch_tanh")]
    GeluNew,
    Relu,
}

/// Architecture hyper-parameters read from `config.json`.
///
/// Unknown keys are ignored, so the full Hugging Face config parses as-is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BertConfig {
    pub vocab_size: usize,
    pub hidden_size: usize,
    pub num_hidden_layers: usize,
    pub num_attention_heads: usize,
    pub intermediate_size: usize,
    #[serde(default)]
    pub hidden_act: HiddenAct,
    #[serde(default = "default_max_position_embeddings")]
    pub max_position_embeddings: usize,
    #[serde(default = "default_type_vocab_size")]
    pub type_vocab_size: usize,
    #[serde(default = "default_layer_norm_eps")]
    pub layer_norm_eps: f64,
}

fn default_max_position_embeddings() -> usize {
    512
}

fn default_type_vocab_size() -> usize {
    2
}

fn default_layer_norm_eps() -> f64 {
    1e-12
}

impl BertConfig {
    /// Read and validate `config.json`.
    pub fn from_file(path: &Path) -> EmbeddingResult<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| EmbeddingError::io(path, e))?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| EmbeddingError::Config {
            message: format!("Failed to parse '{}': {}", path.display(), e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Size of one attention head.
    pub fn head_dim(&self) -> usize {
        self.hidden_size / self.num_attention_heads
    }

    /// # Errors
    /// - `EmbeddingError::Config` if a size is zero or heads do not divide hidden_size
    pub fn validate(&self) -> EmbeddingResult<()> {
        let sizes = [
            ("vocab_size", self.vocab_size),
            ("hidden_size", self.hidden_size),
            ("num_attention_heads", self.num_attention_heads),
            ("intermediate_size", self.intermediate_size),
            ("max_position_embeddings", self.max_position_embeddings),
            ("type_vocab_size", self.type_vocab_size),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, v)| *v == 0) {
            return Err(EmbeddingError::Config {
                message: format!("{} must be greater than 0", name),
            });
        }
        if self.hidden_size % self.num_attention_heads != 0 {
            return Err(EmbeddingError::Config {
                message: format!(
                    "hidden_size {} is not divisible by num_attention_heads {}",
                    self.hidden_size, self.num_attention_heads
                ),
            });
        }
        Ok(())
    }
}
