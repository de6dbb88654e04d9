use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use std::sync::Arc;
use ec_core::{ArticlePayload, CountryRequest, CountrySummary, Error, StoredArticle, WriteOutcome};
use serde_json::{json, Value};
use crate::error::ApiError;
use crate::AppState;

pub async fn summarize_countries(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CountryRequest>,
) -> Result<Json<Vec<CountrySummary>>, ApiError> {
    tracing::info!("Summary requested for {} countries", request.countries.len());
    let summaries = state.orchestrator.country_summaries(&request.countries).await?;
    Ok(Json(summaries))
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StoredArticle>>, ApiError> {
    Ok(Json(state.orchestrator.list_articles().await?))
}

/// Malformed bodies are reported as outcomes, not rejected.
fn read_payload(payload: Result<Json<ArticlePayload>, JsonRejection>) -> Result<ArticlePayload, WriteOutcome> {
    payload
        .map(|Json(payload)| payload)
        .map_err(|rejection| WriteOutcome::failed(Error::InvalidInput(rejection.body_text())))
}

pub async fn create_article(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ArticlePayload>, JsonRejection>,
) -> Json<WriteOutcome> {
    match read_payload(payload) {
        Ok(payload) => Json(state.orchestrator.create_article(&payload).await),
        Err(outcome) => Json(outcome),
    }
}

pub async fn update_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<ArticlePayload>, JsonRejection>,
) -> Json<WriteOutcome> {
    match read_payload(payload) {
        Ok(payload) => Json(state.orchestrator.update_article(&id, &payload).await),
        Err(outcome) => Json(outcome),
    }
}

pub async fn delete_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<WriteOutcome> {
    Json(state.orchestrator.delete_article(&id).await)
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model": state.orchestrator.model_name(),
        "storage": state.orchestrator.store_name(),
    }))
}
