use std::fmt;
use ec_core::{ChatMessage, CompletionModel, Result, Role};
use crate::prompts::RISK_SYSTEM_PROMPT;

/// Offline model: echoes the first words of the last user message.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CompletionModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn complete(&self, _model: &str, messages: &[ChatMessage]) -> Result<String> {
        if messages.iter().any(|m| m.role == Role::System && m.content == RISK_SYSTEM_PROMPT) {
            return Ok("1".to_string());
        }
        let last_user = messages.iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        let words: Vec<&str> = last_user.split_whitespace().take(20).collect();
        Ok(words.join(" "))
    }
}
