use std::fmt;
use std::sync::Arc;
use ec_core::{ChatMessage, CompletionModel, Result};
use tracing::debug;
use crate::prompts::{summary_request, RISK_SYSTEM_PROMPT};
use crate::segmenter::split_into_parts;
use crate::tokenizer::TokenCounter;
use crate::MAX_CONTENT_TOKENS;

/// Content trimmed to fit the token budget.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedContent {
    pub text: String,
    pub token_count: usize,
    /// Parts the content was split into; 1 when it fit as is.
    pub parts_computed: usize,
}

/// Single-pass summarizer: one completion per text, oversized text cut to its first part.
pub struct Summarizer {
    model: Arc<dyn CompletionModel>,
    tokenizer: Arc<dyn TokenCounter>,
    model_name: String,
    token_budget: usize,
}

impl fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Summarizer")
            .field("model", &self.model.name())
            .field("model_name", &self.model_name)
            .field("token_budget", &self.token_budget)
            .finish()
    }
}

impl Summarizer {
    pub fn new(
        model: Arc<dyn CompletionModel>,
        tokenizer: Arc<dyn TokenCounter>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            model,
            tokenizer,
            model_name: model_name.into(),
            token_budget: MAX_CONTENT_TOKENS,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn prepare_content(&self, content: &str) -> PreparedContent {
        let token_count = self.tokenizer.count_tokens(content);
        if token_count <= self.token_budget {
            return PreparedContent {
                text: content.to_string(),
                token_count,
                parts_computed: 1,
            };
        }

        let parts_computed = token_count.div_ceil(self.token_budget);
        debug!(
            "Content has {} tokens over a budget of {}, splitting into {} parts",
            token_count, self.token_budget, parts_computed
        );
        // only the first part is sent; the rest are discarded
        let text = split_into_parts(content, parts_computed)
            .into_iter()
            .next()
            .unwrap_or_default();
        PreparedContent {
            text,
            token_count,
            parts_computed,
        }
    }

    /// Summarize `content` under the given system instruction.
    pub async fn summarize(&self, system_prompt: &str, content: &str) -> Result<String> {
        let prepared = self.prepare_content(content);
        let messages = [
            ChatMessage::system(system_prompt),
            ChatMessage::user(summary_request(&prepared.text)),
        ];
        self.model.complete(&self.model_name, &messages).await
    }

    /// Ask for a 1-10 risk score; the reply is returned verbatim.
    pub async fn assess_risk(&self, summary: &str) -> Result<String> {
        let messages = [
            ChatMessage::system(RISK_SYSTEM_PROMPT),
            ChatMessage::user(summary),
        ];
        self.model.complete(&self.model_name, &messages).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::{ARTICLE_SYSTEM_PROMPT, SUMMARY_INSTRUCTION};
    use crate::testing::{RecordingModel, WordCounter};
    use ec_core::Role;

    fn summarizer(model: Arc<RecordingModel>) -> Summarizer {
        Summarizer::new(model, Arc::new(WordCounter), "gpt-3.5-turbo")
    }

    fn sentences(count: usize) -> String {
        (0..count).map(|n| format!("Output{} slowed.", n)).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_content_within_budget_is_unsplit() {
        let summarizer = summarizer(Arc::new(RecordingModel::new()));
        let content = sentences(MAX_CONTENT_TOKENS / 2);
        let prepared = summarizer.prepare_content(&content);
        assert_eq!(prepared.token_count, MAX_CONTENT_TOKENS - 1);
        assert_eq!(prepared.parts_computed, 1);
        assert_eq!(prepared.text, content);
    }

    #[test]
    fn test_content_over_budget_keeps_first_part() {
        let summarizer = summarizer(Arc::new(RecordingModel::new()));
        // 4000 sentences of two words each
        let content = sentences(4000);
        let prepared = summarizer.prepare_content(&content);
        assert_eq!(prepared.token_count, 8000);
        assert_eq!(prepared.parts_computed, 3);
        assert_eq!(prepared.text, sentences(1333));
    }

    #[test]
    fn test_budget_boundary() {
        let summarizer = summarizer(Arc::new(RecordingModel::new()));
        let exact = vec!["word"; MAX_CONTENT_TOKENS].join(" ");
        assert_eq!(summarizer.prepare_content(&exact).parts_computed, 1);

        let over = vec!["word"; MAX_CONTENT_TOKENS + 1].join(" ");
        assert_eq!(summarizer.prepare_content(&over).parts_computed, 2);
    }

    #[tokio::test]
    async fn test_summarize_sends_system_and_user_turns() {
        let model = Arc::new(RecordingModel::new());
        let summarizer = summarizer(model.clone());

        let reply = summarizer.summarize(ARTICLE_SYSTEM_PROMPT, "short text.").await.unwrap();
        assert_eq!(reply, "summary 1");

        let calls = model.calls();
        assert_eq!(calls.len(), 1);
        let (model_name, messages) = &calls[0];
        assert_eq!(model_name, "gpt-3.5-turbo");
        assert_eq!(messages[0], ChatMessage::system(ARTICLE_SYSTEM_PROMPT));
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, format!("{}short text.", SUMMARY_INSTRUCTION));
    }

    #[tokio::test]
    async fn test_assess_risk_passes_summary_verbatim() {
        let model = Arc::new(RecordingModel::new());
        let summarizer = summarizer(model.clone());

        let level = summarizer.assess_risk("Inflation is at 40%.").await.unwrap();
        assert_eq!(level, "7");

        let calls = model.calls();
        assert_eq!(calls[0].1, vec![
            ChatMessage::system(RISK_SYSTEM_PROMPT),
            ChatMessage::user("Inflation is at 40%."),
        ]);
    }
}
