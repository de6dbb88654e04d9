use std::sync::Arc;
use ec_core::{CompletionModel, Error, Result};
use crate::Config;

pub mod dummy;
pub mod openai;

pub use dummy::DummyModel;
pub use openai::OpenAIModel;

/// Build the completion client named by `config.model`; no config means the offline model.
pub async fn create_model(config: Option<Config>) -> Result<Arc<dyn CompletionModel>> {
    let Some(config) = config else {
        return Ok(Arc::new(DummyModel::new()));
    };

    match config.model.as_str() {
        "openai" => {
            let model = OpenAIModel::new(config.api_key, config.inference_config.model_url)?;
            tracing::debug!("Created completion client: {:?}", model);
            Ok(Arc::new(model))
        }
        "dummy" => Ok(Arc::new(DummyModel::new())),
        other => Err(Error::Config(format!(
            "unknown model '{}', expected one of: openai, dummy",
            other
        ))),
    }
}
