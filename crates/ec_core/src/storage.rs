use async_trait::async_trait;
use crate::types::{Consistency, FeedItem, StoredArticle};
use crate::Result;

/// Field projection for a semantic query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedField {
    Title,
    Content,
    Summary,
    Link,
}

impl FeedField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedField::Title => "title",
            FeedField::Content => "content",
            FeedField::Summary => "summary",
            FeedField::Link => "link",
        }
    }
}

#[async_trait]
pub trait FeedStore: Send + Sync {
    fn name(&self) -> &str;

    /// Semantic nearest-match query with a natural-language question
    async fn ask(&self, question: &str, fields: &[FeedField], limit: usize) -> Result<Vec<FeedItem>>;

    /// All records, unpaginated
    async fn list(&self) -> Result<Vec<StoredArticle>>;

    /// Insert a record and return its id
    async fn create(&self, item: &FeedItem) -> Result<String>;

    /// Overwrite a record's fields, without checking that it exists
    async fn update(&self, id: &str, item: &FeedItem, consistency: Consistency) -> Result<()>;

    /// Remove a record; deleting a missing id is not an error
    async fn delete(&self, id: &str, consistency: Consistency) -> Result<()>;
}
