//! Per-word embeddings from a pretrained transformer encoder.
//!
//! Reads a line-delimited word list, embeds each word with a BERT encoder
//! (mean of the last hidden states over tokens) and writes a
//! `{ "<word>": [floats...] }` JSON object.
//!
//! # Architecture
//!
//! - **words**: Word source (trimmed lines, blanks kept)
//! - **EmbeddingProvider**: Trait for embedding generation
//! - **BertEmbedder**: Pretrained encoder via Candle + tokenizers
//! - **StubEmbedder**: Deterministic stub for tests and dry runs
//! - **collector** / **writer**: per-word failure isolation, JSON output
//!
//! # Example
//!
//! ```rust,no_run
//! use word_vectors_embeddings::{run_pipeline, BertEmbedder, WordVectorsConfig};
//!
//! let config = WordVectorsConfig::default();
//! let embedder = BertEmbedder::load(&config.model)?;
//! let report = run_pipeline(&config.io, &embedder, &mut std::io::stdout())?;
//! println!("{} words embedded", report.succeeded());
//! # Ok::<(), word_vectors_embeddings::EmbeddingError>(())
//! ```

pub mod collector;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod provider;
pub mod stub;
pub mod types;
pub mod words;
pub mod writer;

pub use collector::collect_embeddings;
pub use config::{IoConfig, ModelConfig, WordVectorsConfig};
pub use error::{EmbeddingError, EmbeddingResult};
pub use models::bert::BertEmbedder;
pub use pipeline::run_pipeline;
pub use provider::{check_embedding, EmbeddingProvider};
pub use stub::StubEmbedder;
pub use types::{CollectionReport, Embedding, EmbeddingTable, FailedWord};
pub use words::{load_words, parse_words};
pub use writer::{saved_message, write_table};
