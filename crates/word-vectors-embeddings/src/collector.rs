//! Embedding collector: one pass over the words, per-word failure isolation.

use std::io::Write;
use std::time::Instant;

use crate::error::{EmbeddingError, EmbeddingResult};
use crate::provider::{check_embedding, EmbeddingProvider};
use crate::types::{CollectionReport, FailedWord};

/// Embed every word in order.
///
/// Successes go into the table (a repeated word overwrites its earlier
/// entry). A failure writes `Failed: <word>` to `console`, records the reason
/// and moves on; no placeholder is stored. Vectors whose length differs from
/// `provider.dimension()` or that contain NaN/inf count as failures.
///
/// # Errors
/// - `EmbeddingError::Console` if a diagnostic line cannot be written
pub fn collect_embeddings<P, W>(
    words: &[String],
    provider: &P,
    console: &mut W,
) -> EmbeddingResult<CollectionReport>
where
    P: EmbeddingProvider + ?Sized,
    W: Write + ?Sized,
{
    let started = Instant::now();
    let dimension = provider.dimension();
    let mut report = CollectionReport::default();

    for (position, word) in words.iter().enumerate() {
        let result = provider
            .embed(word)
            .and_then(|embedding| check_embedding(&embedding, dimension).map(|()| embedding));

        match result {
            Ok(embedding) => {
                tracing::trace!(target: "word_vectors::collector", position, word = %word, "Embedded");
                report.table.insert(word.as_str(), embedding);
            }
            Err(err) => {
                tracing::warn!(
                    target: "word_vectors::collector",
                    position,
                    word = %word,
                    error = %err,
                    "Embedding failed, skipping word"
                );
                writeln!(console, "Failed: {}", word).map_err(EmbeddingError::Console)?;
                report.failures.push(FailedWord {
                    word: word.clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    tracing::info!(
        target: "word_vectors::collector",
        model = provider.model_name(),
        words = words.len(),
        unique = report.succeeded(),
        failed = report.failed(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Embedding pass complete"
    );
    Ok(report)
}
