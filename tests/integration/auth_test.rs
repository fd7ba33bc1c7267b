//! Integration tests for signup, login, session checks, health, and config.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_signup_returns_token_and_user() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({ "email": "  Owner@Shop.Test ", "password": "secret123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(response.body["user"]["email"], "owner@shop.test");
    assert!(response.body["user"].get("passwordHash").is_none());
    assert!(response.body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts() {
    let app = TestApp::new();
    app.signup("dup@shop.test", "secret123").await;

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({ "email": "DUP@shop.test", "password": "another1" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "CONFLICT");
}

#[tokio::test]
async fn test_signup_validation() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/auth/signup", Some(json!({})), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
    assert_eq!(response.message(), "Email and password are required");

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({ "email": "short@shop.test", "password": "12345" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.message().contains("at least 6"));

    let response = app
        .send("POST", "/api/auth/signup", "{not json", None, &[])
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_signup_respects_domain_allow_list() {
    let app = TestApp::with_config(|config| {
        config.auth.allowed_email_domains = vec!["gmail.com".to_string()];
    });

    let response = app
        .request(
            "POST",
            "/api/auth/signup",
            Some(json!({ "email": "owner@shop.test", "password": "secret123" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    app.signup("owner@gmail.com", "secret123").await;
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.signup("login@shop.test", "secret123").await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "login@shop.test", "password": "wrong-pass" })),
            None,
        )
        .await;
    let unknown_email = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "nobody@shop.test", "password": "secret123" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);
}

#[tokio::test]
async fn test_login_then_me() {
    let app = TestApp::new();
    let (_, user_id) = app.signup("me@shop.test", "secret123").await;

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ME@shop.test", "password": "secret123" })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    let token = login.body["token"].as_str().unwrap().to_string();

    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["user"]["id"], user_id.to_string());
    assert_eq!(me.body["user"]["email"], "me@shop.test");
}

#[tokio::test]
async fn test_me_requires_valid_token() {
    let app = TestApp::new();

    let missing = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.error_code(), "UNAUTHORIZED");

    let garbage = app
        .request("GET", "/api/auth/me", None, Some("not-a-jwt"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);

    let basic = app
        .send(
            "GET",
            "/api/auth/me",
            "",
            None,
            &[("Authorization", "Basic dXNlcjpwYXNz")],
        )
        .await;
    assert_eq!(basic.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_for_missing_account_rejected() {
    // Same secret, separate store: the token is well-formed but its subject is unknown here.
    let issuer = TestApp::new();
    let token = issuer.merchant().await;

    let app = TestApp::new();
    let response = app
        .send(
            "GET",
            "/api/products",
            "",
            Some(&token),
            &[("X-Forwarded-For", "203.0.113.7"), ("User-Agent", "curl/8.0")],
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.message(), "Account no longer exists");
}

#[tokio::test]
async fn test_token_from_other_secret_rejected() {
    let issuer = TestApp::with_config(|config| {
        config.auth.jwt_secret = "a-different-secret".to_string();
    });
    let token = issuer.merchant().await;

    let app = TestApp::new();
    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_reports_store() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"]["provider"], "memory");
    assert_eq!(response.body["database"]["connected"], true);
    assert!(response.body["version"].as_str().is_some());
    helpers::timestamp(&response.body["time"]);

    app.store.set_available(false);
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "degraded");
    assert_eq!(response.body["database"]["connected"], false);
}

#[tokio::test]
async fn test_public_config() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/config", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["cloudinary"].is_null());

    let app = TestApp::with_config(|config| {
        config.media.cloudinary_cloud_name = Some("demo".to_string());
        config.media.cloudinary_upload_preset = Some("unsigned".to_string());
    });
    let response = app.request("GET", "/api/config", None, None).await;
    assert_eq!(response.body["cloudinary"]["cloudName"], "demo");
    assert_eq!(response.body["cloudinary"]["uploadPreset"], "unsigned");
}

#[tokio::test]
async fn test_store_outage_is_service_unavailable() {
    let app = TestApp::new();
    app.store.set_available(false);

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "any@shop.test", "password": "secret123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.error_code(), "SERVICE_UNAVAILABLE");
}
