use async_trait::async_trait;
use ec_core::{Consistency, Error, FeedField, FeedItem, FeedStore, Result, StoredArticle};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Records in insertion order.
pub struct MemoryStore {
    items: Vec<(String, FeedItem)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    fn insert(&mut self, item: &FeedItem) -> String {
        let id = Uuid::new_v4().to_string();
        self.items.push((id.clone(), item.clone()));
        id
    }

    /// Merges the written fields into an existing record; `link` is kept unless given.
    fn merge(&mut self, id: &str, item: &FeedItem) -> Result<()> {
        let (_, existing) = self.items.iter_mut()
            .find(|(existing_id, _)| existing_id == id)
            .ok_or_else(|| Error::Storage(format!("no record with id {}", id)))?;
        existing.title = item.title.clone();
        existing.content = item.content.clone();
        existing.summary = item.summary.clone();
        if item.link.is_some() {
            existing.link = item.link.clone();
        }
        Ok(())
    }

    fn remove(&mut self, id: &str) {
        self.items.retain(|(existing_id, _)| existing_id != id);
    }

    /// Keyword overlap stands in for vector similarity.
    fn ask(&self, question: &str, fields: &[FeedField], limit: usize) -> Vec<FeedItem> {
        let terms = keywords(question);
        let mut scored: Vec<(usize, &FeedItem)> = self.items.iter()
            .map(|(_, item)| (score(item, &terms), item))
            .filter(|(score, _)| *score > 0)
            .collect();
        // stable, so ties keep insertion order
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter()
            .take(limit)
            .map(|(_, item)| project(item, fields))
            .collect()
    }

    fn list(&self) -> Vec<StoredArticle> {
        self.items.iter()
            .map(|(id, item)| StoredArticle {
                id: id.clone(),
                title: item.title.clone(),
                content: item.content.clone(),
                summary: item.summary.clone(),
            })
            .collect()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn keywords(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().count() > 3)
        .map(str::to_lowercase)
        .collect()
}

fn score(item: &FeedItem, terms: &[String]) -> usize {
    let haystack = format!("{} {} {}", item.title, item.content, item.summary).to_lowercase();
    terms.iter().filter(|term| haystack.contains(term.as_str())).count()
}

fn project(item: &FeedItem, fields: &[FeedField]) -> FeedItem {
    let wants = |field: FeedField| fields.contains(&field);
    FeedItem {
        title: if wants(FeedField::Title) { item.title.clone() } else { String::new() },
        content: if wants(FeedField::Content) { item.content.clone() } else { String::new() },
        summary: if wants(FeedField::Summary) { item.summary.clone() } else { String::new() },
        link: if wants(FeedField::Link) { item.link.clone() } else { None },
    }
}

pub struct MemoryStorage {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryStorage {
    pub async fn new() -> Result<Self> {
        Ok(Self {
            store: Arc::new(RwLock::new(MemoryStore::new())),
        })
    }

    /// Seed records directly, bypassing summarization.
    pub async fn insert(&self, item: FeedItem) -> String {
        self.store.write().await.insert(&item)
    }
}

#[async_trait]
impl FeedStore for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    async fn ask(&self, question: &str, fields: &[FeedField], limit: usize) -> Result<Vec<FeedItem>> {
        let store = self.store.read().await;
        Ok(store.ask(question, fields, limit))
    }

    async fn list(&self) -> Result<Vec<StoredArticle>> {
        let store = self.store.read().await;
        Ok(store.list())
    }

    async fn create(&self, item: &FeedItem) -> Result<String> {
        let mut store = self.store.write().await;
        Ok(store.insert(item))
    }

    async fn update(&self, id: &str, item: &FeedItem, _consistency: Consistency) -> Result<()> {
        let mut store = self.store.write().await;
        store.merge(id, item)
    }

    async fn delete(&self, id: &str, _consistency: Consistency) -> Result<()> {
        let mut store = self.store.write().await;
        store.remove(id);
        Ok(())
    }
}
