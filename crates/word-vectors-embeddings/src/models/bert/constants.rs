//! Constants for the pretrained BERT encoder.

/// Model fetched when nothing else is configured.
pub const DEFAULT_MODEL_ID: &str = "bert-base-uncased";

/// Hidden size of bert-base-uncased, and thus its embedding length.
pub const BERT_BASE_HIDDEN_SIZE: usize = 768;

/// Upper bound on tokens per input, including `[CLS]` and `[SEP]`.
pub const MAX_SEQUENCE_TOKENS: usize = 512;

pub const CONFIG_FILE: &str = "config.json";
pub const TOKENIZER_FILE: &str = "tokenizer.json";
pub const SAFETENSORS_FILE: &str = "model.safetensors";
/// Legacy PyTorch pickle checkpoint, used when no safetensors file exists.
pub const PYTORCH_FILE: &str = "pytorch_model.bin";

/// Additive attention bias for masked positions.
pub(crate) const MASKED_ATTENTION_BIAS: f64 = -10000.0;
