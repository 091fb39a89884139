//! Error types for embedding operations.
//!
//! Every failure surfaces as an `EmbeddingError`. Whether it aborts the run
//! or only drops one word is decided by the caller: the collector treats any
//! error from `embed` as a word failure.

use std::path::PathBuf;

use thiserror::Error;

/// Embedding-specific errors.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Reading or writing a file failed.
    #[error("IO error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be read, parsed or validated.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Tokenizer, config or weights for a model could not be obtained.
    #[error("Failed to load model '{model_id}': {message}")]
    ModelLoad { model_id: String, message: String },

    /// The tokenizer rejected the input text.
    #[error("Tokenization failed: {message}")]
    Tokenization { message: String },

    /// A tensor operation in the forward pass failed.
    #[error("Inference failed: {message}")]
    Inference { message: String },

    /// Produced vector does not have the model's hidden size.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    /// Produced vector contains NaN or infinity.
    #[error("Embedding contains a non-finite value at index {index}")]
    NonFiniteEmbedding { index: usize },

    /// Writing a diagnostic line to the console failed.
    #[error("Console write failed: {0}")]
    Console(#[source] std::io::Error),

    /// JSON encoding of the embedding table failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EmbeddingError {
    /// Build an `Io` error tagged with the path being accessed.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a candle error raised during the forward pass.
    pub(crate) fn inference(context: &str, err: impl std::fmt::Display) -> Self {
        Self::Inference {
            message: format!("{}: {}", context, err),
        }
    }
}

/// Result type for embedding operations.
pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = EmbeddingError::io(
            "inputs/missing.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("inputs/missing.txt"), "got: {}", msg);
    }

    #[test]
    fn test_tokenization_error_message() {
        let err = EmbeddingError::Tokenization {
            message: "102 tokens exceeds limit 16".into(),
        };
        assert_eq!(
            err.to_string(),
            "Tokenization failed: 102 tokens exceeds limit 16"
        );
    }
}
