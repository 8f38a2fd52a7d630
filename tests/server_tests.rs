mod common;

use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;

use common::alex;
use roastme::kernel::form::{FormDraft, FormField, RoastIntensity};
use roastme::server::store::{RoastResponse, RoastStore};
use roastme::server::{create_router, AppState};
use roastme::services::llm::client::{describe, fallback_roast};
use roastme::services::llm::LLMService;

async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api", addr)
}

async fn offline_service() -> String {
    let llm = LLMService::new("http://127.0.0.1:9", None, "gpt-4");
    spawn(create_router(Arc::new(AppState::new(llm)))).await
}

async fn post_roast(client: &reqwest::Client, api: &str, body: Value) -> reqwest::Response {
    client
        .post(format!("{}/roast", api))
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_root_greeting() {
    let api = offline_service().await;
    let body: Value = reqwest::get(format!("{}/", api)).await.unwrap().json().await.unwrap();
    assert_eq!(
        body["message"],
        "AI Roast Me API - Ready to serve digital destruction!"
    );
}

#[tokio::test]
async fn test_create_then_fetch_roast() {
    let api = offline_service().await;
    let client = reqwest::Client::new();

    let created: RoastResponse = post_roast(&client, &api, serde_json::to_value(alex()).unwrap())
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(created.user_data, alex());
    assert_eq!(created.intensity, RoastIntensity::Savage);
    assert_eq!(created.roast, fallback_roast(&alex()));
    assert!(created.processing_time >= 0.0);

    let fetched: RoastResponse = client
        .get(format!("{}/roast/{}", api, created.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_optional_fields_may_be_omitted() {
    let api = offline_service().await;
    let client = reqwest::Client::new();

    let created: RoastResponse = post_roast(&client, &api, json!({ "name": "Jo", "age": "22" }))
        .await
        .json()
        .await
        .unwrap();

    assert_eq!(created.intensity, RoastIntensity::Medium);
    assert_eq!(created.user_data.hobbies, "");
}

#[tokio::test]
async fn test_unknown_intensity_is_rejected() {
    let api = offline_service().await;
    let client = reqwest::Client::new();

    let response = post_roast(
        &client,
        &api,
        json!({ "name": "Jo", "age": "22", "roast_intensity": "nuclear" }),
    )
    .await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_missing_roast_is_404() {
    let api = offline_service().await;
    let client = reqwest::Client::new();

    for id in ["0b7c7f4e-8f6b-4a51-9d0c-2f5e0f6f7a11", "not-a-uuid"] {
        let response = client
            .get(format!("{}/roast/{}", api, id))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "detail": "Roast not found" }));
    }
}

#[tokio::test]
async fn test_stats_count_by_intensity() {
    let api = offline_service().await;
    let client = reqwest::Client::new();

    for intensity in ["savage", "light", "savage"] {
        let response = post_roast(
            &client,
            &api,
            json!({ "name": "Jo", "age": "22", "roast_intensity": intensity }),
        )
        .await;
        assert!(response.status().is_success());
    }

    let stats: Value = reqwest::get(format!("{}/roasts/stats", api))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(stats["total_roasts"], 3);
    assert_eq!(stats["api_status"], "operational");
    assert_eq!(
        stats["intensity_distribution"],
        json!([
            { "_id": "savage", "count": 2 },
            { "_id": "light", "count": 1 }
        ])
    );
}

#[tokio::test]
async fn test_llm_outage_falls_back() {
    // Key set, but nothing listens on the discard port
    let llm = LLMService::new("http://127.0.0.1:9", Some("sk-test".to_string()), "gpt-4");
    assert!(llm.is_configured());
    assert!(llm.generate_roast(&alex()).await.is_err());
    assert_eq!(llm.roast_or_fallback(&alex()).await, fallback_roast(&alex()));
}

#[test]
fn test_blank_key_counts_as_unconfigured() {
    let llm = LLMService::new("http://127.0.0.1:9", Some("  ".to_string()), "gpt-4");
    assert!(!llm.is_configured());
}

#[test]
fn test_prompt_lists_only_given_details() {
    let record = FormDraft::new()
        .with(FormField::Name, "Alex")
        .with(FormField::Age, "30")
        .with(FormField::Occupation, "Barista")
        .submit()
        .unwrap();

    assert_eq!(describe(&record), "Name: Alex, Age: 30, Occupation: Barista");
}

fn stored(intensity: RoastIntensity) -> RoastResponse {
    let mut user_data = alex();
    user_data.roast_intensity = intensity;
    RoastResponse {
        id: uuid::Uuid::new_v4(),
        roast: "Line one".to_string(),
        intensity,
        user_data,
        created_at: chrono::Utc::now(),
        processing_time: 0.01,
    }
}

#[tokio::test]
async fn test_store_evicts_oldest_but_keeps_counting() {
    let store = RoastStore::with_capacity(2);
    let first = stored(RoastIntensity::Savage);
    let second = stored(RoastIntensity::Light);
    let third = stored(RoastIntensity::Savage);

    store.insert(first.clone()).await;
    store.insert(second.clone()).await;
    store.insert(third.clone()).await;

    assert_eq!(store.get(&first.id).await, None);
    assert_eq!(store.get(&second.id).await, Some(second));
    assert_eq!(store.get(&third.id).await, Some(third));

    let stats = store.stats().await;
    assert_eq!(stats.total_roasts, 3);
    assert_eq!(stats.intensity_distribution[0].intensity, RoastIntensity::Savage);
    assert_eq!(stats.intensity_distribution[0].count, 2);
}

#[tokio::test]
async fn test_capped_service_forgets_old_roasts() {
    let llm = LLMService::new("http://127.0.0.1:9", None, "gpt-4");
    let state = AppState::with_store(llm, RoastStore::with_capacity(1));
    let api = spawn(create_router(Arc::new(state))).await;
    let client = reqwest::Client::new();

    let mut ids = Vec::new();
    for _ in 0..2 {
        let created: RoastResponse = post_roast(&client, &api, json!({ "name": "Jo", "age": "22" }))
            .await
            .json()
            .await
            .unwrap();
        ids.push(created.id);
    }

    let old = reqwest::get(format!("{}/roast/{}", api, ids[0])).await.unwrap();
    assert_eq!(old.status(), reqwest::StatusCode::NOT_FOUND);
    let recent = reqwest::get(format!("{}/roast/{}", api, ids[1])).await.unwrap();
    assert!(recent.status().is_success());
}
