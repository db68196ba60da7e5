//! Integration tests for the user list API.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::http::StatusCode;
use backoffice_integration_tests::TestApp;
use serde_json::json;

async fn invite(app: &TestApp, email: &str, role: &str) -> (StatusCode, serde_json::Value) {
    app.post("/api/settings/users", &json!({ "email": email, "role": role }))
        .await
}

#[tokio::test]
async fn test_invite_appends_invited_user() {
    let app = TestApp::spawn().await;
    let (status, body) = invite(&app, "thandi@example.co.za", "staff").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["toast"]["kind"], "success");
    assert_eq!(
        body["data"],
        json!([{ "email": "thandi@example.co.za", "role": "staff", "status": "invited" }])
    );

    let (status, users) = app.get("/api/settings/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_invite_rejected() {
    let app = TestApp::spawn().await;
    invite(&app, "thandi@example.co.za", "staff").await;

    let (status, body) = invite(&app, "Thandi@Example.co.za", "viewer").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["toast"]["kind"], "error");

    let (_, users) = app.get("/api/settings/users").await;
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_email_rejected() {
    let app = TestApp::spawn().await;
    let (status, body) = invite(&app, "not-an-email", "staff").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["toast"]["kind"], "error");
}

#[tokio::test]
async fn test_remove_keeps_order() {
    let app = TestApp::spawn().await;
    invite(&app, "a@example.com", "owner").await;
    invite(&app, "b@example.com", "staff").await;
    invite(&app, "c@example.com", "viewer").await;

    let (status, body) = app.delete("/api/settings/users/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["email"], "a@example.com");
    assert_eq!(body["data"][1]["email"], "c@example.com");
}

#[tokio::test]
async fn test_remove_missing_user_is_not_found() {
    let app = TestApp::spawn().await;
    let (status, body) = app.delete("/api/settings/users/3").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["toast"]["kind"], "error");
}

#[tokio::test]
async fn test_change_role_and_activate() {
    let app = TestApp::spawn().await;
    invite(&app, "a@example.com", "staff").await;

    let (status, body) = app
        .post("/api/settings/users/0/role", &json!({ "role": "owner" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["role"], "owner");

    let (status, body) = app.post("/api/settings/users/0/activate", &json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["status"], "active");
    assert_eq!(app.storage.stored().unwrap()["users"][0]["status"], "active");
}

#[tokio::test]
async fn test_put_replaces_user_list() {
    let app = TestApp::spawn().await;
    invite(&app, "a@example.com", "staff").await;

    let (status, body) = app
        .put(
            "/api/settings/users",
            &json!([{ "email": "b@example.com", "role": "viewer", "status": "active" }]),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["toast"]["message"], "Users settings saved");

    let (_, users) = app.get("/api/settings/users").await;
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["email"], "b@example.com");
}

#[tokio::test]
async fn test_put_with_duplicate_emails_rejected() {
    let app = TestApp::spawn().await;
    let (status, body) = app
        .put(
            "/api/settings/users",
            &json!([
                { "email": "a@example.com", "role": "owner" },
                { "email": "A@example.com", "role": "staff" }
            ]),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["toast"]["kind"], "error");
}

#[tokio::test]
async fn test_unknown_role_is_bad_request_toast() {
    let app = TestApp::spawn().await;
    let (status, body) = invite(&app, "a@example.com", "admin").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["toast"]["kind"], "error");
    assert!(body["toast"]["message"].as_str().unwrap().contains("admin"));
    assert_eq!(app.storage.write_count(), 0);
}

#[tokio::test]
async fn test_non_numeric_index_is_bad_request_toast() {
    let app = TestApp::spawn().await;
    invite(&app, "a@example.com", "staff").await;

    let (status, body) = app.delete("/api/settings/users/first").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["toast"]["kind"], "error");

    let (status, body) = app
        .post("/api/settings/users/-1/role", &json!({ "role": "owner" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["toast"]["kind"], "error");
}

#[tokio::test]
async fn test_non_json_body_is_bad_request_toast() {
    let app = TestApp::spawn().await;

    let (status, body) = app
        .post_raw("/api/settings/users", "text/plain", "email=a@example.com")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["toast"]["kind"], "error");

    let (status, body) = app
        .post_raw("/api/settings/users", "application/json", "{ not json")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["toast"]["kind"], "error");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_invites_are_all_kept() {
    let app = Arc::new(TestApp::spawn().await);

    let requests: Vec<_> = (0..20)
        .map(|i| {
            let app = Arc::clone(&app);
            tokio::spawn(async move { invite(&app, &format!("clerk{i}@example.com"), "staff").await })
        })
        .collect();
    for request in requests {
        let (status, body) = request.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["toast"]["kind"], "success");
    }

    let (_, users) = app.get("/api/settings/users").await;
    assert_eq!(users.as_array().unwrap().len(), 20);
    assert_eq!(
        app.storage.stored().unwrap()["users"].as_array().unwrap().len(),
        20
    );
}
