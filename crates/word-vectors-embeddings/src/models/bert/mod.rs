//! Pretrained BERT encoder (default `bert-base-uncased`, 768D).
//!
//! Pipeline per word:
//! 1. Tokenization with HuggingFace tokenizers
//! 2. Embedding lookup and position encoding
//! 3. Transformer encoder forward pass (inference only)
//! 4. Mean pooling over the token dimension
//!
//! Weights are loaded once via Candle's `VarBuilder` from safetensors (or a
//! legacy `pytorch_model.bin`) found locally or fetched through hf-hub.

mod attention;
mod config;
mod constants;
mod embeddings;
mod encoder;
mod ffn;
mod files;
mod forward;
mod layer_norm;
mod linear;
mod model;
mod pooling;
mod weights;

#[cfg(test)]
mod tests;

pub use config::{BertConfig, HiddenAct};
pub use constants::{
    BERT_BASE_HIDDEN_SIZE, CONFIG_FILE, DEFAULT_MODEL_ID, MAX_SEQUENCE_TOKENS, PYTORCH_FILE,
    SAFETENSORS_FILE, TOKENIZER_FILE,
};
pub use files::{ModelFiles, WeightsFormat};
pub use model::{select_device, BertEmbedder};
pub use crate::provider::check_embedding;
pub use weights::{
    AttentionWeights, BertWeights, EmbeddingWeights, EncoderLayerWeights, FfnWeights,
    LayerNormWeights,
};
