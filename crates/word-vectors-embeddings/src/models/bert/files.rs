//! Locating the tokenizer, config and weights of a pretrained checkpoint.
//!
//! Files come either from a local directory or from the Hugging Face Hub
//! (cached by hf-hub; network and caching behaviour are delegated entirely).

use std::path::{Path, PathBuf};

use hf_hub::api::sync::ApiBuilder;
use hf_hub::{Repo, RepoType};

use crate::config::ModelConfig;
use crate::error::{EmbeddingError, EmbeddingResult};

use super::constants::{CONFIG_FILE, PYTORCH_FILE, SAFETENSORS_FILE, TOKENIZER_FILE};

/// Weight file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightsFormat {
    SafeTensors,
    PyTorch,
}

/// Local paths to everything needed to build a `BertEmbedder`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: PathBuf,
    pub format: WeightsFormat,
}

impl ModelFiles {
    /// Resolve files for `config`: local directory if set, otherwise the hub.
    pub fn resolve(config: &ModelConfig) -> EmbeddingResult<Self> {
        match &config.model_dir {
            Some(dir) => Self::from_dir(&config.model_id, dir),
            None => Self::fetch(
                &config.model_id,
                config.revision.as_deref(),
                config.cache_dir.as_deref(),
            ),
        }
    }

    /// Use files already present in `dir`.
    ///
    /// # Errors
    /// - `EmbeddingError::ModelLoad` if config, tokenizer or weights are missing
    pub fn from_dir(model_id: &str, dir: &Path) -> EmbeddingResult<Self> {
        let require = |name: &str| -> EmbeddingResult<PathBuf> {
            let path = dir.join(name);
            if path.is_file() {
                Ok(path)
            } else {
                Err(EmbeddingError::ModelLoad {
                    model_id: model_id.to_string(),
                    message: format!("missing {}", path.display()),
                })
            }
        };

        let config = require(CONFIG_FILE)?;
        let tokenizer = require(TOKENIZER_FILE)?;
        let (weights, format) = match require(SAFETENSORS_FILE) {
            Ok(path) => (path, WeightsFormat::SafeTensors),
            Err(_) => (require(PYTORCH_FILE)?, WeightsFormat::PyTorch),
        };

        Ok(Self {
            config,
            tokenizer,
            weights,
            format,
        })
    }

    /// Download (or reuse from cache) the files for `model_id`.
    ///
    /// # Errors
    /// - `EmbeddingError::ModelLoad` if the hub client cannot be built or a
    ///   required file cannot be fetched
    pub fn fetch(
        model_id: &str,
        revision: Option<&str>,
        cache_dir: Option<&Path>,
    ) -> EmbeddingResult<Self> {
        let load_err = |message: String| EmbeddingError::ModelLoad {
            model_id: model_id.to_string(),
            message,
        };

        let builder = match cache_dir {
            Some(dir) => ApiBuilder::new().with_cache_dir(dir.to_path_buf()),
            None => ApiBuilder::new(),
        };
        let api = builder
            .with_progress(false)
            .build()
            .map_err(|e| load_err(format!("hub client init failed: {}", e)))?;

        let repo = api.repo(Repo::with_revision(
            model_id.to_string(),
            RepoType::Model,
            revision.unwrap_or("main").to_string(),
        ));

        tracing::info!(
            target: "word_vectors::bert",
            model_id,
            revision = revision.unwrap_or("main"),
            "Resolving model files from Hugging Face Hub"
        );

        let config = repo
            .get(CONFIG_FILE)
            .map_err(|e| load_err(format!("fetch {} failed: {}", CONFIG_FILE, e)))?;
        let tokenizer = repo
            .get(TOKENIZER_FILE)
            .map_err(|e| load_err(format!("fetch {} failed: {}", TOKENIZER_FILE, e)))?;
        let (weights, format) = match repo.get(SAFETENSORS_FILE) {
            Ok(path) => (path, WeightsFormat::SafeTensors),
            Err(e) => {
                tracing::debug!(
                    target: "word_vectors::bert",
                    error = %e,
                    "No safetensors weights, trying {}",
                    PYTORCH_FILE
                );
                let path = repo
                    .get(PYTORCH_FILE)
                    .map_err(|e| load_err(format!("fetch weights failed: {}", e)))?;
                (path, WeightsFormat::PyTorch)
            }
        };

        Ok(Self {
            config,
            tokenizer,
            weights,
            format,
        })
    }
}
