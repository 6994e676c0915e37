//! JSON persistence for scraped records.

use crate::catalog::Record;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes the record list as a pretty-printed JSON array.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes records with four-space indentation and no trailing newline.
    pub fn render(records: &[Record]) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records.serialize(&mut ser).context("Failed to serialize records")?;
        Ok(buf)
    }

    /// Replaces the output file with `records`, creating parent directories.
    ///
    /// The data goes to a sibling temp file first so a failed write never
    /// leaves a truncated file behind.
    pub fn write(&self, records: &[Record]) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }

        let bytes = Self::render(records)?;
        let tmp = self.tmp_path();

        fs::write(&tmp, &bytes)
            .with_context(|| format!("Failed to write output file: {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace output file: {}", self.path.display()))?;

        debug!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }

    /// Reads a previously written file back into records.
    pub fn load(&self) -> Result<Vec<Record>> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read output file: {}", self.path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse output file: {}", self.path.display()))
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
