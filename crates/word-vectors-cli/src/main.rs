//! Word vector dump.
//!
//! Reads a word list, embeds each word with a pretrained BERT encoder and
//! writes `{ "<word>": [floats...] }` to a JSON file.
//!
//! # Usage
//!
//! ```bash
//! # Fixed defaults: bert-base-uncased, ./inputs/sample.txt -> ./outputs/word_vectors.json
//! word-vectors
//!
//! # Local checkpoint, custom paths
//! word-vectors --model-dir ./models/bert-base-uncased --input words.txt --output vectors.json
//!
//! # Debug logging
//! RUST_LOG=debug word-vectors
//! ```
//!
//! Console (stdout) gets one `Failed: <word>` line per failed word and a final
//! `Saved <file>` line. Logs go to stderr.

mod args;

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use word_vectors_embeddings::{run_pipeline, BertEmbedder, EmbeddingProvider, StubEmbedder};

use args::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs on stderr so stdout carries only the console lines.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_writer(io::stderr).with_env_filter(filter).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.resolve_config()?;

    let provider: Box<dyn EmbeddingProvider> = match cli.stub {
        Some(dimension) => {
            info!(dimension, "Using stub embedder");
            Box::new(StubEmbedder::new(dimension))
        }
        None => Box::new(
            BertEmbedder::load(&config.model)
                .with_context(|| format!("initializing model {}", config.model.model_id))?,
        ),
    };

    let mut stdout = io::stdout().lock();
    run_pipeline(&config.io, &provider, &mut stdout)?;
    Ok(())
}
