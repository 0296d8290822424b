//! Integration tests for the backend API endpoints
//!
//! Each test builds the full router against a fresh temp database and
//! drives it with `tower::ServiceExt::oneshot`. The notifier is left
//! unconfigured, exercising the degraded no-op path throughout.

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot`
use tunelead_api::notify::Notifier;
use tunelead_api::{build_router, AppState};
use tunelead_common::db::init_database;

const TEST_ADMIN_PASSWORD: &str = "test-password";

async fn setup_app() -> (TempDir, SqlitePool, Router) {
    let dir = TempDir::new().expect("Should create temp dir");
    let pool = init_database(&dir.path().join("leads.db"))
        .await
        .expect("Should initialize database");

    let state = AppState::new(
        pool.clone(),
        Notifier::new(None),
        TEST_ADMIN_PASSWORD.to_string(),
        Duration::ZERO,
    );
    (dir, pool, build_router(state))
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

fn sample_lead_body(name: &str) -> Value {
    json!({
        "name": name,
        "email": format!("{}@example.com", name.to_ascii_lowercase()),
        "phone": "+1 555 0100",
        "style": "rock",
    })
}

// =============================================================================
// Health and banner
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "tunelead-api");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_service_banner() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app.oneshot(get_request("/api")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "active");
}

// =============================================================================
// Lead creation
// =============================================================================

#[tokio::test]
async fn test_create_lead_returns_full_record() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app
        .oneshot(json_request("POST", "/api/leads", sample_lead_body("Ana")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Ana");
    assert_eq!(body["email"], "ana@example.com");
    assert_eq!(body["status"], "new");
    assert_eq!(body["source"], "landing");
    assert_eq!(body["notified"], false);
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn test_create_lead_survives_notification_failure() {
    // Notifier is unconfigured, so every send attempt fails; creation
    // must succeed anyway and the record must remain intact.
    let (_dir, pool, app) = setup_app().await;

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/leads", sample_lead_body("Ana")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Give the background notify task time to run
    tokio::time::sleep(Duration::from_millis(100)).await;

    let lead = tunelead_common::db::leads::get(&pool, 1).await.unwrap();
    assert_eq!(lead.name, "Ana");
    // The attempt was made even though delivery failed
    assert!(lead.notified);
}

#[tokio::test]
async fn test_create_lead_rejects_bad_email() {
    let (_dir, _pool, app) = setup_app().await;

    let mut body = sample_lead_body("Ana");
    body["email"] = json!("not-an-email");

    let response = app
        .oneshot(json_request("POST", "/api/leads", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

// =============================================================================
// Lead listing / fetch / status update
// =============================================================================

#[tokio::test]
async fn test_list_leads_newest_first() {
    let (_dir, _pool, app) = setup_app().await;

    for name in ["Ana", "Ben", "Cleo"] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/leads", sample_lead_body(name)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(get_request("/api/leads?skip=0&limit=2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let leads = body.as_array().unwrap();
    assert_eq!(leads.len(), 2);
    assert_eq!(leads[0]["name"], "Cleo");
    assert_eq!(leads[1]["name"], "Ben");
}

#[tokio::test]
async fn test_get_missing_lead_is_404() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app.oneshot(get_request("/api/leads/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_update_lead_status() {
    let (_dir, _pool, app) = setup_app().await;

    app.clone()
        .oneshot(json_request("POST", "/api/leads", sample_lead_body("Ana")))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/leads/1/status?status=contacted")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);

    let response = app.oneshot(get_request("/api/leads/1")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "contacted");
}

#[tokio::test]
async fn test_update_status_rejects_unknown_value() {
    let (_dir, _pool, app) = setup_app().await;

    app.clone()
        .oneshot(json_request("POST", "/api/leads", sample_lead_body("Ana")))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/leads/1/status?status=archived")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_status_missing_lead_is_404() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/leads/42/status?status=contacted")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Track generation
// =============================================================================

#[tokio::test]
async fn test_generate_track_returns_processing() {
    let (_dir, pool, app) = setup_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/generate",
            json!({
                "prompt": "sunny beach anthem",
                "style": "electronic",
                "duration": 30,
                "lead_id": 999,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "processing");
    // Weak reference: lead 999 does not exist, request persists anyway
    assert_eq!(body["lead_id"], 999);

    // With zero delay the worker finishes promptly in the background
    tokio::time::sleep(Duration::from_millis(200)).await;
    let track = tunelead_common::db::tracks::get(&pool, 1).await.unwrap();
    assert_eq!(
        track.status,
        tunelead_common::db::models::TrackStatus::Completed
    );
    assert_eq!(track.audio_url.as_deref(), Some("/tracks/1/audio.mp3"));
}

#[tokio::test]
async fn test_generate_track_rejects_empty_prompt() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app
        .oneshot(json_request("POST", "/api/generate", json!({ "prompt": " " })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Stats
// =============================================================================

#[tokio::test]
async fn test_stats_counts_today_and_totals() {
    let (_dir, pool, app) = setup_app().await;

    for name in ["Ana", "Ben"] {
        app.clone()
            .oneshot(json_request("POST", "/api/leads", sample_lead_body(name)))
            .await
            .unwrap();
    }

    // Backdate a third lead to yesterday
    let yesterday = chrono::Utc::now() - chrono::Duration::hours(25);
    sqlx::query(
        "INSERT INTO leads (name, email, phone, style, created_at) VALUES ('Old', 'old@example.com', '1', 'pop', ?1)",
    )
    .bind(yesterday)
    .execute(&pool)
    .await
    .unwrap();

    app.clone()
        .oneshot(json_request("POST", "/api/generate", json!({ "prompt": "x" })))
        .await
        .unwrap();

    let response = app.oneshot(get_request("/api/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_leads"], 3);
    assert_eq!(body["new_leads"], 3);
    assert_eq!(body["today_leads"], 2);
    assert_eq!(body["total_tracks"], 1);
}

// =============================================================================
// Admin auth
// =============================================================================

#[tokio::test]
async fn test_admin_login_wrong_password() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin/login",
            json!({ "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_login_and_verify_roundtrip() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/login",
            json!({ "password": TEST_ADMIN_PASSWORD }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["success"], true);
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(token.len(), 32);

    let response = app
        .oneshot(get_request(&format!("/api/admin/verify?token={}", token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["valid"], true);
}

#[tokio::test]
async fn test_admin_verify_rejects_unknown_token() {
    let (_dir, _pool, app) = setup_app().await;

    let response = app
        .oneshot(get_request("/api/admin/verify?token=bogus"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
