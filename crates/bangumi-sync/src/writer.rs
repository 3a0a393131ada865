//! JSON output files.
//!
//! Files are replaced wholesale on every write: no merge with the previous
//! content, no backup, no atomic rename.

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use tracing::debug;

/// Write `records` as a pretty-printed JSON array, replacing `path`.
///
/// Parent directories are created as needed. An empty slice writes `[]`.
pub fn write_records<T: Serialize>(path: impl AsRef<Path>, records: &[T]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(records).context("Failed to serialize records")?;

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;

    debug!(path = %path.display(), records = records.len(), "Output written");
    Ok(())
}

/// Read a JSON document written by hand or by [`write_records`]
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
