//! Root configuration for the word-vector pipeline.
//!
//! Every field has a default, so running with no file, no environment and no
//! CLI flags reproduces the fixed behaviour: `bert-base-uncased`, reading
//! `./inputs/sample.txt` and writing `./outputs/word_vectors.json`.
//!
//! # TOML Structure
//!
//! ```toml
//! [model]
//! model_id = "bert-base-uncased"
//! model_dir = "./models/bert-base-uncased"   # optional, skips the hub
//! cache_dir = "./.hf-cache"                   # optional
//! revision = "main"                           # optional
//! use_cuda = false
//!
//! [io]
//! input_path = "./inputs/sample.txt"
//! output_path = "./outputs/word_vectors.json"
//! ```
//!
//! Priority: CLI flags > `WORD_VECTORS_*` environment > file > defaults.

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EmbeddingError, EmbeddingResult};
use crate::models::bert::DEFAULT_MODEL_ID;

/// Default word list location, relative to the working directory.
pub const DEFAULT_INPUT_PATH: &str = "./inputs/sample.txt";

/// Default output location, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "./outputs/word_vectors.json";

// ============================================================================
// MODEL CONFIG
// ============================================================================

/// Which pretrained encoder to load and from where.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Hugging Face model identifier.
    #[serde(default = "default_model_id")]
    pub model_id: String,

    /// Local directory holding `config.json`, `tokenizer.json` and
    /// `model.safetensors`. When set, the hub is never contacted.
    #[serde(default)]
    pub model_dir: Option<PathBuf>,

    /// hf-hub cache directory. `None` uses the hf-hub default.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Hub revision (branch, tag or commit). `None` means `main`.
    #[serde(default)]
    pub revision: Option<String>,

    /// Run on CUDA device 0 when available.
    #[serde(default)]
    pub use_cuda: bool,
}

fn default_model_id() -> String {
    DEFAULT_MODEL_ID.to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            model_dir: None,
            cache_dir: None,
            revision: None,
            use_cuda: false,
        }
    }
}

impl ModelConfig {
    /// # Errors
    /// - `EmbeddingError::Config` if model_id is empty
    /// - `EmbeddingError::Config` if revision is present but empty
    pub fn validate(&self) -> EmbeddingResult<()> {
        if self.model_id.trim().is_empty() {
            return Err(EmbeddingError::Config {
                message: "model_id cannot be empty".to_string(),
            });
        }
        if matches!(&self.revision, Some(r) if r.trim().is_empty()) {
            return Err(EmbeddingError::Config {
                message: "revision cannot be empty when set".to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// IO CONFIG
// ============================================================================

/// Input word list and output JSON locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IoConfig {
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,

    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

fn default_input_path() -> PathBuf {
    PathBuf::from(DEFAULT_INPUT_PATH)
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            output_path: default_output_path(),
        }
    }
}

impl IoConfig {
    /// # Errors
    /// - `EmbeddingError::Config` if either path is empty
    pub fn validate(&self) -> EmbeddingResult<()> {
        if self.input_path.as_os_str().is_empty() {
            return Err(EmbeddingError::Config {
                message: "input_path cannot be empty".to_string(),
            });
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(EmbeddingError::Config {
                message: "output_path cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// ROOT CONFIG
// ============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WordVectorsConfig {
    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub io: IoConfig,
}

impl WordVectorsConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// - `EmbeddingError::Config` if the file cannot be read or parsed
    pub fn from_file(path: impl AsRef<Path>) -> EmbeddingResult<Self> {
        let path = path.as_ref();

        let contents = std::fs::read_to_string(path).map_err(|e| EmbeddingError::Config {
            message: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;

        toml::from_str(&contents).map_err(|e| EmbeddingError::Config {
            message: format!("Failed to parse TOML in '{}': {}", path.display(), e),
        })
    }

    /// Create configuration from TOML string.
    pub fn from_toml_str(toml: &str) -> EmbeddingResult<Self> {
        toml::from_str(toml).map_err(|e| EmbeddingError::Config {
            message: format!("Failed to parse TOML: {}", e),
        })
    }

    /// Validate all sections, returning the first error found.
    pub fn validate(&self) -> EmbeddingResult<()> {
        self.model.validate().map_err(|e| EmbeddingError::Config {
            message: format!("[model] {}", e),
        })?;

        self.io.validate().map_err(|e| EmbeddingError::Config {
            message: format!("[io] {}", e),
        })?;

        Ok(())
    }

    /// Apply environment variable overrides. Prefix: `WORD_VECTORS_`
    ///
    /// | Variable | Config Path | Type |
    /// |----------|-------------|------|
    /// | `WORD_VECTORS_MODEL_ID` | `model.model_id` | String |
    /// | `WORD_VECTORS_MODEL_DIR` | `model.model_dir` | path |
    /// | `WORD_VECTORS_CACHE_DIR` | `model.cache_dir` | path |
    /// | `WORD_VECTORS_USE_CUDA` | `model.use_cuda` | bool |
    /// | `WORD_VECTORS_INPUT` | `io.input_path` | path |
    /// | `WORD_VECTORS_OUTPUT` | `io.output_path` | path |
    ///
    /// Values that fail to parse are ignored.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = env::var("WORD_VECTORS_MODEL_ID") {
            self.model.model_id = val;
        }
        if let Ok(val) = env::var("WORD_VECTORS_MODEL_DIR") {
            self.model.model_dir = Some(PathBuf::from(val));
        }
        if let Ok(val) = env::var("WORD_VECTORS_CACHE_DIR") {
            self.model.cache_dir = Some(PathBuf::from(val));
        }
        if let Ok(val) = env::var("WORD_VECTORS_USE_CUDA") {
            if let Ok(b) = val.parse::<bool>() {
                self.model.use_cuda = b;
            }
        }

        if let Ok(val) = env::var("WORD_VECTORS_INPUT") {
            self.io.input_path = PathBuf::from(val);
        }
        if let Ok(val) = env::var("WORD_VECTORS_OUTPUT") {
            self.io.output_path = PathBuf::from(val);
        }

        self
    }
}
