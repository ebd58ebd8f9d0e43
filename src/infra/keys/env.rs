use anyhow::Result;

use super::KeySource;

/// Reads the key from an environment variable (`.env` is loaded at startup).
pub struct EnvKeySource {
    var: String,
}

impl EnvKeySource {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait::async_trait]
impl KeySource for EnvKeySource {
    async fn get(&self) -> Result<Option<String>> {
        Ok(std::env::var(&self.var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()))
    }

    fn describe(&self) -> String {
        format!("env:{}", self.var)
    }
}
