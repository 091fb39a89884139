//! Command-line arguments and configuration resolution.
//!
//! Priority: CLI flags > `WORD_VECTORS_*` environment > config file > defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use word_vectors_embeddings::WordVectorsConfig;

/// Embed every word of a line-delimited file with a pretrained BERT encoder
/// and save the vectors as a JSON object.
#[derive(Parser, Debug)]
#[command(name = "word-vectors", version)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Hugging Face model identifier (default: bert-base-uncased).
    #[arg(long, value_name = "ID")]
    pub model: Option<String>,

    /// Local directory with config.json, tokenizer.json and weights.
    #[arg(long, value_name = "DIR")]
    pub model_dir: Option<PathBuf>,

    /// hf-hub cache directory.
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Hub revision (branch, tag or commit).
    #[arg(long)]
    pub revision: Option<String>,

    /// Word list, one word per line (default: ./inputs/sample.txt).
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Output JSON file (default: ./outputs/word_vectors.json).
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Run the encoder on CUDA device 0 when available.
    #[arg(long)]
    pub cuda: bool,

    /// Skip the pretrained model and use the deterministic stub embedder
    /// with this many dimensions.
    #[arg(long, value_name = "DIM", hide = true)]
    pub stub: Option<usize>,
}

impl Cli {
    /// Load the config file (if any), then environment, then CLI flags.
    pub fn resolve_config(&self) -> Result<WordVectorsConfig> {
        let base = match &self.config {
            Some(path) => WordVectorsConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => WordVectorsConfig::default(),
        };

        let config = self.apply_overrides(base.with_env_overrides());
        config.validate().context("invalid configuration")?;
        Ok(config)
    }

    /// Overwrite `config` with every flag that was given.
    pub fn apply_overrides(&self, mut config: WordVectorsConfig) -> WordVectorsConfig {
        if let Some(model) = &self.model {
            config.model.model_id = model.clone();
        }
        if let Some(dir) = &self.model_dir {
            config.model.model_dir = Some(dir.clone());
        }
        if let Some(dir) = &self.cache_dir {
            config.model.cache_dir = Some(dir.clone());
        }
        if let Some(revision) = &self.revision {
            config.model.revision = Some(revision.clone());
        }
        if self.cuda {
            config.model.use_cuda = true;
        }
        if let Some(input) = &self.input {
            config.io.input_path = input.clone();
        }
        if let Some(output) = &self.output {
            config.io.output_path = output.clone();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_flags_keep_defaults() {
        let cli = Cli::try_parse_from(["word-vectors"]).unwrap();
        let config = cli.apply_overrides(WordVectorsConfig::default());
        assert_eq!(config, WordVectorsConfig::default());
        assert!(cli.stub.is_none());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "word-vectors",
            "--model",
            "bert-base-cased",
            "--input",
            "words.txt",
            "--output",
            "out/vectors.json",
            "--cuda",
        ])
        .unwrap();

        let mut base = WordVectorsConfig::default();
        base.model.model_dir = Some(PathBuf::from("/models/bert"));
        let config = cli.apply_overrides(base);

        assert_eq!(config.model.model_id, "bert-base-cased");
        assert_eq!(config.model.model_dir, Some(PathBuf::from("/models/bert")));
        assert!(config.model.use_cuda);
        assert_eq!(config.io.input_path, PathBuf::from("words.txt"));
        assert_eq!(config.io.output_path, PathBuf::from("out/vectors.json"));
    }

    #[test]
    fn test_stub_dimension_parses() {
        let cli = Cli::try_parse_from(["word-vectors", "--stub", "32"]).unwrap();
        assert_eq!(cli.stub, Some(32));
    }

    #[test]
    fn test_rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["word-vectors", "--batch-size", "8"]).is_err());
    }
}
