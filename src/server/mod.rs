//! The roast service: `POST /api/roast` and friends.

pub mod routes;
pub mod store;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::services::llm::LLMService;
use store::RoastStore;

pub struct AppState {
    pub store: RoastStore,
    pub llm: LLMService,
}

impl AppState {
    pub fn new(llm: LLMService) -> Self {
        Self::with_store(llm, RoastStore::new())
    }

    pub fn with_store(llm: LLMService, store: RoastStore) -> Self {
        Self { store, llm }
    }
}

/// Create the router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/", get(routes::root_handler))
        .route("/api/roast", post(routes::create_roast_handler))
        .route("/api/roast/{roast_id}", get(routes::get_roast_handler))
        .route("/api/roasts/stats", get(routes::stats_handler))
        .layer(cors)
        .with_state(state)
}

/// Run the HTTP server
pub async fn run(bind: &str, state: Arc<AppState>) -> Result<()> {
    if !state.llm.is_configured() {
        info!("No OPENAI_API_KEY set: every roast will be the fallback roast");
    }

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Roast service listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
