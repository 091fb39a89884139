//! Embedding writer: the table as a pretty-printed JSON object.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{EmbeddingError, EmbeddingResult};
use crate::types::EmbeddingTable;

/// Serialize `table` to `path` with 2-space indentation, replacing any
/// existing file. The parent directory must already exist.
///
/// # Errors
/// - `EmbeddingError::Io` if the file cannot be created or flushed
/// - `EmbeddingError::Serialization` if encoding or writing fails midway
pub fn write_table(table: &EmbeddingTable, path: impl AsRef<Path>) -> EmbeddingResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| EmbeddingError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, table)?;
    writer.flush().map_err(|e| EmbeddingError::io(path, e))?;

    tracing::debug!(
        target: "word_vectors::writer",
        path = %path.display(),
        entries = table.len(),
        "Embedding table written"
    );
    Ok(())
}

/// Completion line printed after a successful write, e.g. `Saved word_vectors.json`.
pub fn saved_message(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    format!("Saved {}", name)
}
