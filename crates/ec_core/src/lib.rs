pub mod models;
pub mod error;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use models::{ChatMessage, CompletionModel, Role};
pub use storage::{FeedField, FeedStore};
pub use types::{
    ArticlePayload, Consistency, CountryRequest, CountrySummary, FeedItem, StoredArticle,
    WriteOutcome, FEED_ITEM_CLASS,
};
