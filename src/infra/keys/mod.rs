//! Civic information API-key resolution.
//!
//! [`KeySource`] is the async trait for reading the key from one place.
//! [`EnvKeySource`] reads an environment variable, [`FileKeySource`] reads a
//! key file such as `secret.key`. [`resolve_api_key`] tries sources in order.

mod env;
mod file;

pub use env::EnvKeySource;
pub use file::FileKeySource;

use anyhow::Result;
use tracing::debug;

/// Resolves an API key from a single location.
#[async_trait::async_trait]
pub trait KeySource: Send + Sync {
    /// Returns `Ok(None)` when this source has no key configured.
    async fn get(&self) -> Result<Option<String>>;

    fn describe(&self) -> String;
}

/// Returns the first key found, trying `sources` in order.
pub async fn resolve_api_key(sources: &[&dyn KeySource]) -> Result<Option<String>> {
    for source in sources {
        if let Some(key) = source.get().await? {
            debug!(source = %source.describe(), "API key resolved");
            return Ok(Some(key));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<&'static str>);

    #[async_trait::async_trait]
    impl KeySource for Fixed {
        async fn get(&self) -> Result<Option<String>> {
            Ok(self.0.map(str::to_string))
        }

        fn describe(&self) -> String {
            "fixed".to_string()
        }
    }

    #[tokio::test]
    async fn test_first_source_with_key_wins() {
        let (none, a, b) = (Fixed(None), Fixed(Some("a")), Fixed(Some("b")));
        let sources: [&dyn KeySource; 3] = [&none, &a, &b];

        let key = resolve_api_key(&sources).await.unwrap();
        assert_eq!(key.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_no_source_has_key() {
        let none = Fixed(None);
        let key = resolve_api_key(&[&none as &dyn KeySource]).await.unwrap();
        assert!(key.is_none());
    }
}
