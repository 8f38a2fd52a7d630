use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

use super::store::RoastResponse;
use super::AppState;
use crate::kernel::form::SubmissionRecord;

pub async fn root_handler() -> impl IntoResponse {
    Json(json!({ "message": "AI Roast Me API - Ready to serve digital destruction!" }))
}

pub async fn create_roast_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SubmissionRecord>,
) -> impl IntoResponse {
    let started = Instant::now();

    let roast = state.llm.roast_or_fallback(&request).await;
    let processing_time = started.elapsed().as_secs_f64();

    let response = RoastResponse {
        id: Uuid::new_v4(),
        roast,
        intensity: request.roast_intensity,
        user_data: request,
        created_at: Utc::now(),
        processing_time,
    };

    state.store.insert(response.clone()).await;
    info!(
        "Generated roast for {} in {:.2}s",
        response.user_data.name, processing_time
    );

    Json(response)
}

pub async fn get_roast_handler(
    State(state): State<Arc<AppState>>,
    Path(roast_id): Path<String>,
) -> impl IntoResponse {
    let found = match Uuid::parse_str(&roast_id) {
        Ok(id) => state.store.get(&id).await,
        Err(_) => None,
    };

    match found {
        Some(roast) => Json(roast).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Roast not found" })),
        )
            .into_response(),
    }
}

pub async fn stats_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.stats().await)
}
