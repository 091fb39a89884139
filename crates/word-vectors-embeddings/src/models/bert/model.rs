//! `BertEmbedder`: tokenizer + encoder weights behind `EmbeddingProvider`.

use std::time::Instant;

use candle_core::Device;
use tokenizers::Tokenizer;

use crate::config::ModelConfig;
use crate::error::{EmbeddingError, EmbeddingResult};
use crate::provider::EmbeddingProvider;
use crate::types::Embedding;

use super::config::BertConfig;
use super::files::ModelFiles;
use super::forward::{forward, max_sequence_len};
use super::weights::BertWeights;

/// Pretrained BERT encoder producing mean-pooled word embeddings.
///
/// Constructed once per run and shared by reference; nothing in it changes
/// after loading.
pub struct BertEmbedder {
    model_id: String,
    weights: BertWeights,
    tokenizer: Tokenizer,
}

impl BertEmbedder {
    /// Resolve, load and validate the model described by `config`.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - model files cannot be found locally or fetched from the hub
    /// - `config.json` is malformed
    /// - `tokenizer.json` cannot be parsed
    /// - weights are missing tensors or have unexpected shapes
    pub fn load(config: &ModelConfig) -> EmbeddingResult<Self> {
        let started = Instant::now();
        tracing::info!(
            target: "word_vectors::bert",
            model_id = %config.model_id,
            model_dir = ?config.model_dir,
            "Loading BERT encoder"
        );

        let files = ModelFiles::resolve(config)?;
        let embedder = Self::from_files(&config.model_id, &files, &select_device(config.use_cuda))?;

        tracing::info!(
            target: "word_vectors::bert",
            model_id = %config.model_id,
            params = embedder.weights.param_count(),
            hidden_size = embedder.weights.config.hidden_size,
            layers = embedder.weights.config.num_hidden_layers,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "BERT encoder loaded"
        );
        Ok(embedder)
    }

    /// Load from already-resolved files onto `device`.
    pub fn from_files(model_id: &str, files: &ModelFiles, device: &Device) -> EmbeddingResult<Self> {
        let load_err = |message: String| {
            tracing::error!(
                target: "word_vectors::bert",
                model_id,
                error = %message,
                "BERT encoder load FAILED"
            );
            EmbeddingError::ModelLoad {
                model_id: model_id.to_string(),
                message,
            }
        };

        let bert_config = BertConfig::from_file(&files.config)
            .map_err(|e| load_err(format!("config: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&files.tokenizer).map_err(|e| {
            load_err(format!(
                "tokenizer load failed at {}: {}",
                files.tokenizer.display(),
                e
            ))
        })?;

        let weights = BertWeights::load(&files.weights, files.format, bert_config, device)
            .map_err(|e| {
                load_err(format!(
                    "weight load failed at {}: {}",
                    files.weights.display(),
                    e
                ))
            })?;

        Self::from_parts(model_id, weights, tokenizer)
    }

    /// Assemble from loaded parts.
    ///
    /// Padding and truncation configured inside the tokenizer are disabled so
    /// over-long words reach the forward pass and fail there.
    pub fn from_parts(
        model_id: impl Into<String>,
        weights: BertWeights,
        mut tokenizer: Tokenizer,
    ) -> EmbeddingResult<Self> {
        let model_id = model_id.into();
        tokenizer.with_padding(None);
        tokenizer
            .with_truncation(None)
            .map_err(|e| EmbeddingError::ModelLoad {
                model_id: model_id.clone(),
                message: format!("tokenizer truncation reset failed: {}", e),
            })?;

        Ok(Self {
            model_id,
            weights,
            tokenizer,
        })
    }

    pub fn weights(&self) -> &BertWeights {
        &self.weights
    }
}

impl EmbeddingProvider for BertEmbedder {
    fn embed(&self, word: &str) -> EmbeddingResult<Embedding> {
        forward(word, &self.weights, &self.tokenizer)
    }

    fn dimension(&self) -> usize {
        self.weights.config.hidden_size
    }

    fn model_name(&self) -> &str {
        &self.model_id
    }

    fn max_tokens(&self) -> usize {
        max_sequence_len(&self.weights)
    }
}

/// CUDA device 0 when requested and available, CPU otherwise.
pub fn select_device(use_cuda: bool) -> Device {
    if !use_cuda {
        return Device::Cpu;
    }
    match Device::cuda_if_available(0) {
        Ok(dev) if dev.is_cuda() => {
            tracing::info!(target: "word_vectors::bert", "CUDA device detected, using GPU");
            dev
        }
        Ok(_) => {
            tracing::warn!(target: "word_vectors::bert", "CUDA requested but not available, using CPU");
            Device::Cpu
        }
        Err(e) => {
            tracing::warn!(target: "word_vectors::bert", error = %e, "Failed to initialize CUDA, using CPU");
            Device::Cpu
        }
    }
}
