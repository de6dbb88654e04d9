use async_trait::async_trait;
use ec_core::{ChatMessage, CompletionModel, Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const SERVICE: &str = "openai";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

pub struct OpenAIModel {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIModel {
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Result<Self> {
        let api_key = api_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::Config("OpenAI API key is required".to_string()))?;
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        url::Url::parse(&base_url)
            .map_err(|e| Error::Config(format!("invalid model URL '{}': {}", base_url, e)))?;

        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl fmt::Debug for OpenAIModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAIModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl CompletionModel for OpenAIModel {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> Result<String> {
        debug!("Requesting {} completion with {} messages", model, messages.len());
        let response = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&ChatRequest { model, messages })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(Error::Remote { service: SERVICE, status: status.as_u16(), message });
        }

        let response = response.json::<ChatResponse>().await?;
        response.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::Inference("completion returned no message content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn model(server: &MockServer) -> OpenAIModel {
        OpenAIModel::new(Some("test-api-key".to_string()), Some(server.uri())).unwrap()
    }

    #[test]
    fn test_model_requires_api_key() {
        let result = OpenAIModel::new(None, None);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().to_string(), "Configuration error: OpenAI API key is required");

        assert!(OpenAIModel::new(Some(String::new()), None).is_err());
        assert!(OpenAIModel::new(Some("key".into()), None).is_ok());
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("Authorization", "Bearer test-api-key"))
            .and(body_partial_json(json!({
                "model": "gpt-3.5-turbo",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "hi"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-1",
                "object": "chat.completion",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "Germany's economy stagnated."},
                    "finish_reason": "stop"
                }]
            })))
            .mount(&server)
            .await;

        let reply = model(&server)
            .complete("gpt-3.5-turbo", &[ChatMessage::system("sys"), ChatMessage::user("hi")])
            .await
            .unwrap();
        assert_eq!(reply, "Germany's economy stagnated.");
    }

    #[tokio::test]
    async fn test_complete_maps_api_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {"message": "You exceeded your current quota", "type": "insufficient_quota"}
            })))
            .mount(&server)
            .await;

        let err = model(&server)
            .complete("gpt-3.5-turbo", &[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        match err {
            Error::Remote { service, status, message } => {
                assert_eq!(service, "openai");
                assert_eq!(status, 429);
                assert_eq!(message, "You exceeded your current quota");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_complete_without_choices_is_fault() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = model(&server)
            .complete("gpt-3.5-turbo", &[ChatMessage::user("hi")])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Inference(_)));
    }
}
