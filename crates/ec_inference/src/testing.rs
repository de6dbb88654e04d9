use std::sync::Mutex;
use async_trait::async_trait;
use ec_core::{ChatMessage, CompletionModel, Error, Result};
use crate::prompts::RISK_SYSTEM_PROMPT;
use crate::tokenizer::TokenCounter;

/// One token per whitespace-separated word.
pub struct WordCounter;

impl TokenCounter for WordCounter {
    fn count_tokens(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}

/// Records every request. Replies `summary N` for the Nth summary call and `7` for risk calls.
pub struct RecordingModel {
    calls: Mutex<Vec<(String, Vec<ChatMessage>)>>,
    fail_on_call: Option<usize>,
}

impl RecordingModel {
    pub fn new() -> Self {
        Self { calls: Mutex::new(Vec::new()), fail_on_call: None }
    }

    /// Fail the given call (1-based) with a remote error.
    pub fn failing_on(call: usize) -> Self {
        Self { calls: Mutex::new(Vec::new()), fail_on_call: Some(call) }
    }

    pub fn calls(&self) -> Vec<(String, Vec<ChatMessage>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionModel for RecordingModel {
    fn name(&self) -> &str {
        "Recording"
    }

    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> Result<String> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((model.to_string(), messages.to_vec()));
            calls.len()
        };
        if self.fail_on_call == Some(call) {
            return Err(Error::Remote {
                service: "openai",
                status: 429,
                message: "quota exceeded".to_string(),
            });
        }
        if messages.first().map(|m| m.content.as_str()) == Some(RISK_SYSTEM_PROMPT) {
            return Ok("7".to_string());
        }
        Ok(format!("summary {}", call))
    }
}
