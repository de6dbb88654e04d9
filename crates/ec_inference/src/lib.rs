pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod segmenter;
pub mod summarizer;
pub mod tokenizer;

#[cfg(test)]
mod testing;

pub const DEFAULT_MODEL_NAME: &str = "gpt-3.5-turbo";

/// Token budget for the user turn of a single completion request.
pub const MAX_CONTENT_TOKENS: usize = 3097;

/// Number of records requested per country.
pub const COUNTRY_QUERY_LIMIT: usize = 3;

#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub model_url: Option<String>,
    pub model_name: String,
    /// Adds a second completion per country producing `dangerous_level`.
    pub risk_assessment: bool,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            model_url: None,
            model_name: DEFAULT_MODEL_NAME.to_string(),
            risk_assessment: false,
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub inference_config: InferenceConfig,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("inference_config", &self.inference_config)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "openai".to_string(),
            inference_config: InferenceConfig::default(),
        }
    }
}

pub mod prelude {
    pub use super::{Config, InferenceConfig};
    pub use super::models::create_model;
    pub use super::orchestrator::Orchestrator;
    pub use super::summarizer::Summarizer;
    pub use super::tokenizer::{Gpt2Tokenizer, TokenCounter};
    pub use ec_core::{Error, Result};
}

pub use models::create_model;
pub use orchestrator::Orchestrator;
pub use summarizer::Summarizer;
pub use tokenizer::{Gpt2Tokenizer, TokenCounter};
