use serde::{Deserialize, Serialize};

/// Class name of feed records in the vector store.
pub const FEED_ITEM_CLASS: &str = "FeedItem";

/// A record owned by the vector store. Fields missing from a projection come back empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// An article as returned by `GET /articles`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredArticle {
    pub id: String,
    pub title: String,
    pub content: String,
    pub summary: String,
}

/// Body of article create/update requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticlePayload {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryRequest {
    pub countries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub country: String,
    pub summary: String,
    pub links: Vec<String>,
    /// Raw model output, never parsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dangerous_level: Option<String>,
}

/// Consistency requested from the store on writes and deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Consistency {
    #[default]
    Default,
    /// Confirmed across all replicas before responding.
    All,
}

impl Consistency {
    pub fn as_query_value(&self) -> Option<&'static str> {
        match self {
            Consistency::Default => None,
            Consistency::All => Some("ALL"),
        }
    }
}

/// Result of a write-path operation, serialized as `{status, id?, message?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum WriteOutcome {
    Ok {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
    Error {
        message: String,
    },
}

impl WriteOutcome {
    pub fn ok() -> Self {
        WriteOutcome::Ok { id: None }
    }

    pub fn created(id: String) -> Self {
        WriteOutcome::Ok { id: Some(id) }
    }

    pub fn failed(err: impl std::fmt::Display) -> Self {
        WriteOutcome::Error {
            message: err.to_string(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, WriteOutcome::Ok { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_outcome_shape() {
        let created = serde_json::to_value(WriteOutcome::created("abc".into())).unwrap();
        assert_eq!(created, json!({"status": "ok", "id": "abc"}));

        let ok = serde_json::to_value(WriteOutcome::ok()).unwrap();
        assert_eq!(ok, json!({"status": "ok"}));

        let failed = serde_json::to_value(WriteOutcome::failed("store down")).unwrap();
        assert_eq!(failed, json!({"status": "error", "message": "store down"}));
    }

    #[test]
    fn test_country_summary_omits_missing_risk_level() {
        let summary = CountrySummary {
            country: "Chile".into(),
            summary: "Copper exports grew.".into(),
            links: vec![],
            dangerous_level: None,
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert!(value.get("dangerous_level").is_none());
    }

    #[test]
    fn test_feed_item_tolerates_projection() {
        let item: FeedItem = serde_json::from_value(json!({"summary": "s"})).unwrap();
        assert_eq!(item.summary, "s");
        assert!(item.title.is_empty());
        assert!(item.link.is_none());
    }
}
