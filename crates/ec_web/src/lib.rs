use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/summary", post(handlers::summarize_countries))
        .route("/articles", get(handlers::list_articles).post(handlers::create_article))
        .route("/articles/:id", put(handlers::update_article).delete(handlers::delete_article))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(state: AppState, addr: &str) -> ec_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await
        .map_err(|e| ec_core::Error::Config(format!("cannot bind {}: {}", addr, e)))?;
    tracing::info!("Listening on http://{}", addr);
    axum::serve(listener, create_app(state)).await
        .map_err(|e| ec_core::Error::External(e.into()))?;
    Ok(())
}

pub mod prelude {
    pub use ec_core::{Error, Result};
    pub use crate::{create_app, serve, AppState};
}
