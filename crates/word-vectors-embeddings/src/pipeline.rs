//! Load words -> embed each -> write JSON, in a single sequential pass.

use std::io::Write;
use std::time::Instant;

use crate::collector::collect_embeddings;
use crate::config::IoConfig;
use crate::error::{EmbeddingError, EmbeddingResult};
use crate::provider::EmbeddingProvider;
use crate::types::CollectionReport;
use crate::words::load_words;
use crate::writer::{saved_message, write_table};

/// Run the whole pipeline with an already-initialized provider.
///
/// Per-word failures are reported on `console` and left out of the output.
/// The output file is written once, after every word has been attempted.
///
/// # Errors
/// - `EmbeddingError::Io` if the input cannot be read or the output written
/// - `EmbeddingError::Console` if a console line cannot be written
pub fn run_pipeline<P, W>(
    io: &IoConfig,
    provider: &P,
    console: &mut W,
) -> EmbeddingResult<CollectionReport>
where
    P: EmbeddingProvider + ?Sized,
    W: Write + ?Sized,
{
    let started = Instant::now();
    tracing::info!(
        target: "word_vectors::pipeline",
        input = %io.input_path.display(),
        output = %io.output_path.display(),
        model = provider.model_name(),
        dimension = provider.dimension(),
        "Starting word vector pipeline"
    );

    let words = load_words(&io.input_path)?;
    let report = collect_embeddings(&words, provider, console)?;
    write_table(&report.table, &io.output_path)?;

    writeln!(console, "{}", saved_message(&io.output_path)).map_err(EmbeddingError::Console)?;

    tracing::info!(
        target: "word_vectors::pipeline",
        words = words.len(),
        saved = report.succeeded(),
        failed = report.failed(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Pipeline complete"
    );
    Ok(report)
}
