use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::PathBuf;

use super::KeySource;

/// Reads the key from a plain-text file; surrounding whitespace is trimmed.
///
/// A missing file means "no key", any other I/O error is returned.
pub struct FileKeySource {
    path: PathBuf,
}

impl FileKeySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl KeySource for FileKeySource {
    async fn get(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let key = content.trim();
                Ok((!key.is_empty()).then(|| key.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("failed to read {}", self.path.display())),
        }
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
