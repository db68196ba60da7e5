//! Integration tests for the settings section API.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use backoffice_admin::storage::MemorySettingsStorage;
use backoffice_integration_tests::TestApp;
use serde_json::json;

// =============================================================================
// Reads
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;
    let body = app
        .client
        .get(app.url("/health"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_fresh_store_serves_defaults() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get("/api/settings").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["general"]["brandName"], "My Store");
    assert_eq!(body["general"]["currency"], "ZAR");
    assert_eq!(body["general"]["timezone"], "Africa/Johannesburg");
    assert_eq!(body["branding"]["primary"], "#6EC1FF");
    assert_eq!(body["branding"]["accent"], "#F5A524");
    assert_eq!(body["notifications"]["payout"], false);
    assert_eq!(body["users"], json!([]));
}

#[tokio::test]
async fn test_get_one_section() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get("/api/settings/notifications").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "newOrder": true, "lowStock": true, "review": true, "payout": false })
    );
}

#[tokio::test]
async fn test_unknown_section_is_not_found() {
    let app = TestApp::spawn().await;
    let (status, body) = app.get("/api/settings/billing").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["toast"]["kind"], "error");
    assert!(body["toast"]["message"].as_str().unwrap().contains("billing"));
}

#[tokio::test]
async fn test_settings_page_renders() {
    let app = TestApp::spawn().await;
    let resp = app
        .client
        .get(app.url("/settings?success=saved"))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());

    let html = resp.text().await.unwrap();
    assert!(html.contains("My Store"));
    assert!(html.contains("Settings saved."));
    assert!(html.contains("Notifications"));
}

// =============================================================================
// Writes
// =============================================================================

#[tokio::test]
async fn test_put_replaces_section_with_success_toast() {
    let app = TestApp::spawn().await;
    let branding = json!({
        "logoUrl": "https://cdn.example.com/logo.png",
        "primary": "#112233",
        "accent": "#445566",
        "dark": true,
        "sidebarDensity": "compact"
    });

    let (status, body) = app.put("/api/settings/branding", &branding).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["toast"]["kind"], "success");
    assert_eq!(body["toast"]["message"], "Branding settings saved");
    assert_eq!(body["data"]["primary"], "#112233");

    let (_, saved) = app.get("/api/settings/branding").await;
    assert_eq!(saved["dark"], true);
    assert_eq!(saved["sidebarDensity"], "compact");
    assert_eq!(app.storage.stored().unwrap()["branding"]["accent"], "#445566");
}

#[tokio::test]
async fn test_put_is_replace_not_merge() {
    let app = TestApp::spawn().await;
    app.put(
        "/api/settings/general",
        &json!({ "brandName": "Pineapple Co", "address": "1 Long St, Cape Town" }),
    )
    .await;

    let (status, _) = app
        .put("/api/settings/general", &json!({ "brandName": "Pineapple Co" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, general) = app.get("/api/settings/general").await;
    assert_eq!(general["address"], json!(null));
}

#[tokio::test]
async fn test_blank_brand_name_rejected() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .put("/api/settings/general", &json!({ "brandName": "   " }))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["toast"]["kind"], "error");

    let (_, general) = app.get("/api/settings/general").await;
    assert_eq!(general["brandName"], "My Store");
}

#[tokio::test]
async fn test_bad_color_rejected() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .put("/api/settings/branding", &json!({ "primary": "blue" }))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["toast"]["kind"], "error");
}

#[tokio::test]
async fn test_malformed_section_is_bad_request() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .put("/api/settings/notifications", &json!({ "lowStock": "sometimes" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["toast"]["kind"], "error");
}

#[tokio::test]
async fn test_low_stock_toggle_persists() {
    let app = TestApp::spawn().await;
    let (status, _) = app
        .put(
            "/api/settings/notifications",
            &json!({ "newOrder": true, "lowStock": false, "review": true, "payout": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, notifications) = app.get("/api/settings/notifications").await;
    assert_eq!(notifications["lowStock"], false);
    assert_eq!(
        app.storage.stored().unwrap()["notifications"]["lowStock"],
        false
    );
}

#[tokio::test]
async fn test_storage_failure_reports_error_and_keeps_state() {
    let app = TestApp::spawn().await;
    app.get("/api/settings").await;
    app.storage.fail_writes(true);

    let (status, body) = app
        .put("/api/settings/general", &json!({ "brandName": "Pineapple Co" }))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["toast"]["kind"], "error");
    assert!(!body["toast"]["message"]
        .as_str()
        .unwrap()
        .contains("quota"));

    let (_, general) = app.get("/api/settings/general").await;
    assert_eq!(general["brandName"], "My Store");
}

#[tokio::test]
async fn test_existing_record_is_loaded() {
    let storage = MemorySettingsStorage::with_value(json!({
        "general": { "brandName": "Naartjie Goods" },
        "branding": "not an object"
    }));
    let app = TestApp::spawn_with(storage).await;

    let (_, body) = app.get("/api/settings").await;
    assert_eq!(body["general"]["brandName"], "Naartjie Goods");
    assert_eq!(body["branding"]["primary"], "#6EC1FF");
}

#[tokio::test]
async fn test_unreadable_backend_is_retried_without_overwriting() {
    let record = json!({
        "general": { "brandName": "Real Shop" },
        "users": [{ "email": "owner@example.com", "role": "owner", "status": "active" }]
    });
    let app = TestApp::spawn_with(MemorySettingsStorage::with_value(record.clone())).await;
    app.storage.fail_reads(true);

    let (status, general) = app.get("/api/settings/general").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(general["brandName"], "My Store");

    let (status, body) = app
        .put("/api/settings/notifications", &json!({ "payout": true }))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["toast"]["kind"], "error");

    app.storage.fail_reads(false);
    let (_, general) = app.get("/api/settings/general").await;
    assert_eq!(general["brandName"], "Real Shop");

    app.store.flush().await.unwrap();
    assert_eq!(app.storage.stored(), Some(record));
}

#[tokio::test]
async fn test_put_non_json_body_is_bad_request_toast() {
    let app = TestApp::spawn().await;
    let resp = app
        .client
        .put(app.url("/api/settings/general"))
        .body("brandName=Pineapple")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["toast"]["kind"], "error");
}
