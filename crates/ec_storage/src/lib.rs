use ec_core::{Error, FeedStore, Result, FEED_ITEM_CLASS};
use std::fmt;
use std::sync::Arc;
use url::Url;

pub mod backends;

pub use backends::*;

pub const DEFAULT_WEAVIATE_URL: &str = "http://localhost:8080";

#[derive(Clone)]
pub struct BackendConfig {
    pub url: String,
    pub class_name: String,
    pub api_key: Option<String>,
    /// Forwarded to the store so its `ask` module can call the completion service.
    pub openai_key: Option<String>,
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("class_name", &self.class_name)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("openai_key", &self.openai_key.as_deref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_WEAVIATE_URL.to_string(),
            class_name: FEED_ITEM_CLASS.to_string(),
            api_key: None,
            openai_key: None,
        }
    }
}

impl BackendConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_openai_key(mut self, openai_key: Option<String>) -> Self {
        self.openai_key = openai_key;
        self
    }

    /// Base URL without a trailing slash, validated.
    pub fn base_url(&self) -> Result<String> {
        let parsed = Url::parse(&self.url)
            .map_err(|e| Error::Config(format!("invalid store URL '{}': {}", self.url, e)))?;
        Ok(parsed.as_str().trim_end_matches('/').to_string())
    }
}

/// Build the store named on the command line.
pub async fn create_storage(kind: &str, config: BackendConfig) -> Result<Arc<dyn FeedStore>> {
    match kind {
        "weaviate" => Ok(Arc::new(WeaviateStorage::new(config)?)),
        "memory" => Ok(Arc::new(MemoryStorage::new().await?)),
        other => Err(Error::Config(format!(
            "unknown storage backend '{}', expected one of: weaviate, memory",
            other
        ))),
    }
}

pub mod prelude {
    pub use super::BackendConfig;
    pub use super::backends::*;
}
