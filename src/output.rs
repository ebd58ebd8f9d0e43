//! Letter persistence and run-report output.
//!
//! Supports writing letters to a directory, pretty-printing, and JSON
//! serialization of the [`RunReport`].

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::pipeline::RunReport;

/// Persists a rendered document under a row identifier.
pub trait DocumentWriter {
    /// Returns where the document was written.
    fn write(&self, id: &str, body: &str) -> Result<PathBuf>;
}

/// Writes `thanks_<id>.html` files into a directory, creating it on first use.
///
/// Existing files are overwritten.
#[derive(Debug, Clone)]
pub struct DirectoryWriter {
    dir: PathBuf,
}

impl DirectoryWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("thanks_{id}.html"))
    }
}

impl DocumentWriter for DirectoryWriter {
    fn write(&self, id: &str, body: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;

        let path = self.path_for(id);
        debug!(path = %path.display(), bytes = body.len(), "Writing letter");
        fs::write(&path, format!("{body}\n"))
            .with_context(|| format!("failed to write {}", path.display()))?;

        Ok(path)
    }
}

/// Logs the run report using Rust's debug pretty-print format.
pub fn print_pretty(report: &RunReport) {
    debug!("{:#?}", report);
}

/// Logs the run report as pretty-printed JSON.
pub fn print_json(report: &RunReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
