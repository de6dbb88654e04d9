use std::fmt;
use std::sync::Arc;
use ec_core::{
    ArticlePayload, Consistency, CountrySummary, FeedField, FeedItem, FeedStore, Result,
    StoredArticle, WriteOutcome,
};
use tracing::{debug, info, warn};
use crate::prompts::{country_question, ARTICLE_SYSTEM_PROMPT, COUNTRY_SYSTEM_PROMPT};
use crate::summarizer::Summarizer;
use crate::COUNTRY_QUERY_LIMIT;

/// Ties the feed store to the summarizer for every HTTP operation.
pub struct Orchestrator {
    store: Arc<dyn FeedStore>,
    summarizer: Summarizer,
    risk_assessment: bool,
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("store", &self.store.name())
            .field("summarizer", &self.summarizer)
            .field("risk_assessment", &self.risk_assessment)
            .finish()
    }
}

impl Orchestrator {
    pub fn new(store: Arc<dyn FeedStore>, summarizer: Summarizer) -> Self {
        Self {
            store,
            summarizer,
            risk_assessment: false,
        }
    }

    pub fn with_risk_assessment(mut self, enabled: bool) -> Self {
        self.risk_assessment = enabled;
        self
    }

    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    pub fn model_name(&self) -> &str {
        self.summarizer.model_name()
    }

    /// Summaries in input order. The first fault aborts the whole batch.
    pub async fn country_summaries(&self, countries: &[String]) -> Result<Vec<CountrySummary>> {
        let mut summaries = Vec::with_capacity(countries.len());
        for country in countries {
            summaries.push(self.country_summary(country).await?);
        }
        Ok(summaries)
    }

    async fn country_summary(&self, country: &str) -> Result<CountrySummary> {
        let records = self.store
            .ask(
                &country_question(country),
                &[FeedField::Summary, FeedField::Link],
                COUNTRY_QUERY_LIMIT,
            )
            .await?;

        let content: String = records.iter().map(|r| r.summary.as_str()).collect();
        let links: Vec<String> = records.iter().filter_map(|r| r.link.clone()).collect();
        info!("Summarizing {:?} from {} records", country, records.len());

        let summary = self.summarizer.summarize(COUNTRY_SYSTEM_PROMPT, &content).await?;
        let dangerous_level = if self.risk_assessment {
            Some(self.summarizer.assess_risk(&summary).await?)
        } else {
            None
        };

        Ok(CountrySummary {
            country: country.to_string(),
            summary,
            links,
            dangerous_level,
        })
    }

    pub async fn list_articles(&self) -> Result<Vec<StoredArticle>> {
        self.store.list().await
    }

    async fn article_item(&self, payload: &ArticlePayload) -> Result<FeedItem> {
        let summary = self.summarizer.summarize(ARTICLE_SYSTEM_PROMPT, &payload.content).await?;
        Ok(FeedItem {
            title: payload.title.clone(),
            content: payload.content.clone(),
            summary,
            link: None,
        })
    }

    pub async fn create_article(&self, payload: &ArticlePayload) -> WriteOutcome {
        let created = match self.article_item(payload).await {
            Ok(item) => self.store.create(&item).await,
            Err(e) => Err(e),
        };
        match created {
            Ok(id) => {
                info!("Created article {} ({:?})", id, payload.title);
                WriteOutcome::created(id)
            }
            Err(e) => {
                warn!("Failed to create article {:?}: {}", payload.title, e);
                WriteOutcome::failed(e)
            }
        }
    }

    pub async fn update_article(&self, id: &str, payload: &ArticlePayload) -> WriteOutcome {
        let updated = match self.article_item(payload).await {
            Ok(item) => self.store.update(id, &item, Consistency::All).await,
            Err(e) => Err(e),
        };
        match updated {
            Ok(()) => {
                info!("Updated article {}", id);
                WriteOutcome::ok()
            }
            Err(e) => {
                warn!("Failed to update article {}: {}", id, e);
                WriteOutcome::failed(e)
            }
        }
    }

    pub async fn delete_article(&self, id: &str) -> WriteOutcome {
        match self.store.delete(id, Consistency::All).await {
            Ok(()) => {
                debug!("Deleted article {}", id);
                WriteOutcome::ok()
            }
            Err(e) => {
                warn!("Failed to delete article {}: {}", id, e);
                WriteOutcome::failed(e)
            }
        }
    }
}
