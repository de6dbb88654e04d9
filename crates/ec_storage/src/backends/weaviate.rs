use async_trait::async_trait;
use ec_core::{Consistency, Error, FeedField, FeedItem, FeedStore, Result, StoredArticle};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt;
use tracing::debug;
use crate::BackendConfig;

const SERVICE: &str = "weaviate";
/// Page size for cursor-paginated listing.
const LIST_PAGE_SIZE: usize = 100;

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct ObjectResponse {
    id: String,
}

pub struct WeaviateStorage {
    client: Client,
    base_url: String,
    config: BackendConfig,
}

impl fmt::Debug for WeaviateStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeaviateStorage")
            .field("client", &"<reqwest::Client>")
            .field("config", &self.config)
            .finish()
    }
}

impl WeaviateStorage {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let base_url = config.base_url()?;
        Ok(Self {
            client: Client::new(),
            base_url,
            config,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut request = self.client.request(method, format!("{}{}", self.base_url, path));
        if let Some(key) = &self.config.openai_key {
            request = request.header("X-OpenAI-Api-Key", key);
        }
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }
        request
    }

    fn object_path(&self, id: &str) -> String {
        format!("/v1/objects/{}/{}", self.config.class_name, id)
    }

    fn with_consistency(request: RequestBuilder, consistency: Consistency) -> RequestBuilder {
        match consistency.as_query_value() {
            Some(level) => request.query(&[("consistency_level", level)]),
            None => request,
        }
    }

    /// Runs a `Get` query and returns the list under `data.Get.<class>`.
    async fn graphql(&self, query: String) -> Result<Vec<Value>> {
        debug!("Weaviate GraphQL query: {}", query);
        let response = self.request(Method::POST, "/v1/graphql")
            .json(&json!({ "query": query }))
            .send()
            .await?;
        let response = check_status(response).await?;
        let body: GraphQlResponse = response.json().await?;

        if !body.errors.is_empty() {
            let message = body.errors.iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(Error::Remote { service: SERVICE, status: 200, message });
        }

        let records = body.data
            .as_ref()
            .and_then(|data| data.get("Get"))
            .and_then(|get| get.get(&self.config.class_name))
            .ok_or_else(|| Error::Storage(format!(
                "response has no data.Get.{}", self.config.class_name
            )))?;

        match records {
            Value::Null => Ok(Vec::new()),
            Value::Array(records) => Ok(records.clone()),
            other => Err(Error::Storage(format!("unexpected query result: {}", other))),
        }
    }

    fn properties(&self, item: &FeedItem) -> Value {
        let mut properties = json!({
            "title": item.title,
            "content": item.content,
            "summary": item.summary,
        });
        if let Some(link) = &item.link {
            properties["link"] = json!(link);
        }
        properties
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(Error::Remote {
        service: SERVICE,
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Weaviate reports failures as `{"error": [{"message": ...}]}`.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            value.get("error")?.as_array().map(|errors| {
                errors.iter()
                    .filter_map(|e| e.get("message").and_then(Value::as_str))
                    .collect::<Vec<_>>()
                    .join("; ")
            })
        })
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| body.to_string())
}

fn text_field(record: &Value, field: &str) -> String {
    record.get(field).and_then(Value::as_str).unwrap_or_default().to_string()
}

fn feed_item(record: &Value) -> FeedItem {
    FeedItem {
        title: text_field(record, "title"),
        content: text_field(record, "content"),
        summary: text_field(record, "summary"),
        link: record.get("link").and_then(Value::as_str).map(str::to_string),
    }
}

#[async_trait]
impl FeedStore for WeaviateStorage {
    fn name(&self) -> &str {
        "weaviate"
    }

    async fn ask(&self, question: &str, fields: &[FeedField], limit: usize) -> Result<Vec<FeedItem>> {
        let projection = fields.iter().map(FeedField::as_str).collect::<Vec<_>>().join(" ");
        // a JSON string literal is also a valid GraphQL string literal
        let question = serde_json::to_string(question)?;
        let query = format!(
            "{{ Get {{ {}(ask: {{question: {}}}, limit: {}) {{ {} }} }} }}",
            self.config.class_name, question, limit, projection
        );
        let records = self.graphql(query).await?;
        Ok(records.iter().map(feed_item).collect())
    }

    async fn list(&self) -> Result<Vec<StoredArticle>> {
        let mut articles = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let after = match &cursor {
                Some(id) => format!(", after: {}", serde_json::to_string(id)?),
                None => String::new(),
            };
            let query = format!(
                "{{ Get {{ {}(limit: {}{}) {{ title content summary _additional {{ id }} }} }} }}",
                self.config.class_name, LIST_PAGE_SIZE, after
            );
            let records = self.graphql(query).await?;
            if records.is_empty() {
                break;
            }
            for record in &records {
                let id = record.get("_additional")
                    .and_then(|additional| additional.get("id"))
                    .and_then(Value::as_str)
                    .ok_or_else(|| Error::Storage("listed record has no _additional.id".to_string()))?;
                articles.push(StoredArticle {
                    id: id.to_string(),
                    title: text_field(record, "title"),
                    content: text_field(record, "content"),
                    summary: text_field(record, "summary"),
                });
            }
            cursor = articles.last().map(|article| article.id.clone());
        }
        debug!("Listed {} {} objects", articles.len(), self.config.class_name);
        Ok(articles)
    }

    async fn create(&self, item: &FeedItem) -> Result<String> {
        let body = json!({
            "class": self.config.class_name,
            "properties": self.properties(item),
        });
        let response = self.request(Method::POST, "/v1/objects")
            .json(&body)
            .send()
            .await?;
        let created: ObjectResponse = check_status(response).await?.json().await?;
        debug!("Created {} object {}", self.config.class_name, created.id);
        Ok(created.id)
    }

    /// Merges the given properties; ones not sent (such as an absent `link`) are kept.
    async fn update(&self, id: &str, item: &FeedItem, consistency: Consistency) -> Result<()> {
        let body = json!({
            "class": self.config.class_name,
            "id": id,
            "properties": self.properties(item),
        });
        let request = self.request(Method::PATCH, &self.object_path(id)).json(&body);
        let response = Self::with_consistency(request, consistency).send().await?;
        check_status(response).await?;
        Ok(())
    }

    async fn delete(&self, id: &str, consistency: Consistency) -> Result<()> {
        let request = self.request(Method::DELETE, &self.object_path(id));
        let response = Self::with_consistency(request, consistency).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("Delete of missing {} object {} ignored", self.config.class_name, id);
            return Ok(());
        }
        check_status(response).await?;
        Ok(())
    }
}
