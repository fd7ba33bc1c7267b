//! Integration tests for share link issuance and anonymous catalog access.

mod helpers;

use axum::http::StatusCode;
use chrono::Duration;
use serde_json::json;

use helpers::{TestApp, timestamp};
use stockshare_core::traits::TimeSource;
use stockshare_database::ShareTokenStore;

async fn create_link(app: &TestApp, token: &str, body: &str) -> helpers::TestResponse {
    app.send("POST", "/api/share-links", body, Some(token), &[])
        .await
}

fn share_token(response: &helpers::TestResponse) -> String {
    response.body["shareLink"]["token"]
        .as_str()
        .expect("No share token in response")
        .to_string()
}

async fn stock_catalog(app: &TestApp, token: &str) {
    for (id, name) in [("b-1", "Zucchini"), ("a-2", "Apples"), ("c-3", "Milk")] {
        app.create_product(
            token,
            json!({
                "id": id,
                "name": name,
                "category": "Fresh",
                "stock": 5,
                "unit": "pc",
                "reorderPoint": 1,
                "price": 0.5
            }),
        )
        .await;
    }
}

#[tokio::test]
async fn test_issue_with_default_lifetime() {
    let app = TestApp::new();
    let token = app.merchant().await;

    let response = create_link(&app, &token, "").await;
    assert_eq!(response.status, StatusCode::CREATED);

    let link = &response.body["shareLink"];
    let value = share_token(&response);
    assert_eq!(value.len(), 32);
    assert!(value.bytes().all(|b| b.is_ascii_hexdigit()));
    assert_eq!(
        link["url"],
        format!("http://{}/customer/{}", helpers::TEST_HOST, value)
    );
    assert_eq!(
        timestamp(&link["expiresAt"]),
        app.clock.now() + Duration::minutes(5)
    );
}

#[tokio::test]
async fn test_ttl_is_clamped_and_defaulted() {
    let app = TestApp::new();
    let token = app.merchant().await;

    let response = create_link(&app, &token, r#"{"durationMinutes": 120}"#).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(
        timestamp(&response.body["shareLink"]["expiresAt"]),
        app.clock.now() + Duration::minutes(60)
    );

    let response = create_link(&app, &token, r#"{"durationMinutes": 0}"#).await;
    assert_eq!(
        timestamp(&response.body["shareLink"]["expiresAt"]),
        app.clock.now() + Duration::minutes(5)
    );

    let response = create_link(&app, &token, r#"{"durationMinutes": "15"}"#).await;
    assert_eq!(
        timestamp(&response.body["shareLink"]["expiresAt"]),
        app.clock.now() + Duration::minutes(15)
    );
}

#[tokio::test]
async fn test_out_of_range_lifetimes_are_clamped() {
    let app = TestApp::new();
    let token = app.merchant().await;

    let response = create_link(&app, &token, r#"{"durationMinutes": 1e20}"#).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(
        timestamp(&response.body["shareLink"]["expiresAt"]),
        app.clock.now() + Duration::minutes(60)
    );

    let response = create_link(&app, &token, r#"{"durationMinutes": -1e300}"#).await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(
        timestamp(&response.body["shareLink"]["expiresAt"]),
        app.clock.now() + Duration::minutes(5)
    );
}

#[tokio::test]
async fn test_invalid_lifetime_rejected() {
    let app = TestApp::new();
    let token = app.merchant().await;

    for body in [r#"{"durationMinutes": 2.5}"#, r#"{"durationMinutes": "soon"}"#, "{oops"] {
        let response = create_link(&app, &token, body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body {body}");
        assert_eq!(response.error_code(), "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_url_uses_forwarded_proto() {
    let app = TestApp::new();
    let token = app.merchant().await;

    let response = app
        .send(
            "POST",
            "/api/share-links",
            "",
            Some(&token),
            &[("X-Forwarded-Proto", "https, http")],
        )
        .await;

    let url = response.body["shareLink"]["url"].as_str().unwrap();
    assert!(url.starts_with("https://shop.test/customer/"), "{url}");
}

#[tokio::test]
async fn test_url_uses_configured_base() {
    let app = TestApp::with_config(|config| {
        config.share.public_base_url = Some("https://catalog.example.com/".to_string());
    });
    let token = app.merchant().await;

    let response = create_link(&app, &token, "").await;
    let value = share_token(&response);
    assert_eq!(
        response.body["shareLink"]["url"],
        format!("https://catalog.example.com/customer/{value}")
    );
}

#[tokio::test]
async fn test_public_catalog_by_name() {
    let app = TestApp::new();
    let token = app.merchant().await;
    stock_catalog(&app, &token).await;

    let value = share_token(&create_link(&app, &token, "").await);
    let response = app
        .request("GET", &format!("/api/public/products/{value}"), None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let products = response.body["products"].as_array().unwrap();
    let names: Vec<&str> = products
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Apples", "Milk", "Zucchini"]);
    assert!(products.iter().all(|p| p.get("ownerId").is_none()));
    assert_eq!(products[0]["reorderPoint"], 1);
}

#[tokio::test]
async fn test_catalog_is_scoped_to_owner() {
    let app = TestApp::new();
    let owner = app.merchant().await;
    let other = app.merchant().await;
    stock_catalog(&app, &owner).await;

    let value = share_token(&create_link(&app, &other, "").await);
    let response = app
        .request("GET", &format!("/api/public/products/{value}"), None, None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["products"], json!([]));
}

#[tokio::test]
async fn test_new_link_supersedes_previous() {
    let app = TestApp::new();
    let token = app.merchant().await;

    let first = share_token(&create_link(&app, &token, "").await);
    let second = share_token(&create_link(&app, &token, "").await);
    assert_ne!(first, second);

    let response = app
        .request("GET", &format!("/api/public/products/{first}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", &format!("/api/public/products/{second}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let current = app
        .request("GET", "/api/share-links/current", None, Some(&token))
        .await;
    assert_eq!(current.status, StatusCode::OK);
    assert_eq!(current.body["shareLink"]["token"], second);
}

#[tokio::test]
async fn test_link_expires_and_is_swept() {
    let app = TestApp::new();
    let (token, owner_id) = app.signup("expiry@shop.test", "secret123").await;

    let value = share_token(&create_link(&app, &token, r#"{"durationMinutes": 10}"#).await);
    let path = format!("/api/public/products/{value}");

    app.clock.advance(Duration::minutes(10) - Duration::seconds(1));
    assert_eq!(app.request("GET", &path, None, None).await.status, StatusCode::OK);

    app.clock.advance(Duration::seconds(1));
    assert_eq!(
        app.request("GET", &path, None, None).await.status,
        StatusCode::NOT_FOUND
    );

    let record = app.store.find_by_token(&value).await.unwrap().unwrap();
    assert!(!record.is_active);
    assert_eq!(record.owner_id, owner_id);

    let current = app
        .request("GET", "/api/share-links/current", None, Some(&token))
        .await;
    assert!(current.body["shareLink"].is_null());

    // Once swept, rewinding the clock does not bring the link back.
    app.clock.advance(Duration::minutes(-5));
    assert_eq!(
        app.request("GET", &path, None, None).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_rejections_are_indistinguishable() {
    let app = TestApp::new();
    let token = app.merchant().await;

    let expired = share_token(&create_link(&app, &token, r#"{"durationMinutes": 1}"#).await);
    let superseded = share_token(&create_link(&app, &token, r#"{"durationMinutes": 60}"#).await);
    create_link(&app, &token, r#"{"durationMinutes": 60}"#).await;
    app.clock.advance(Duration::minutes(2));

    let mut bodies = Vec::new();
    for value in [
        expired.as_str(),
        superseded.as_str(),
        "00000000000000000000000000000000",
        "not-a-real-token",
        "%2E%2E%2Fetc",
    ] {
        let response = app
            .request("GET", &format!("/api/public/products/{value}"), None, None)
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "token {value}");
        bodies.push(response.body);
    }

    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(bodies[0]["error"], "NOT_FOUND");
    assert_eq!(bodies[0]["message"], "Share link not found or expired");
}

#[tokio::test]
async fn test_current_link_absent_by_default() {
    let app = TestApp::new();
    let token = app.merchant().await;

    let response = app
        .request("GET", "/api/share-links/current", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "shareLink": null }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_issues_leave_one_active() {
    let app = TestApp::new();
    let (token, owner_id) = app.signup("burst@shop.test", "secret123").await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let app = app.clone();
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            create_link(&app, &token, "").await
        }));
    }
    let mut responses = Vec::new();
    for handle in handles {
        responses.push(handle.await.unwrap());
    }
    assert!(responses.iter().all(|r| r.status == StatusCode::CREATED));

    let tokens = app.store.list_for_owner(owner_id).await.unwrap();
    assert_eq!(tokens.len(), 8);
    assert_eq!(tokens.iter().filter(|t| t.is_active).count(), 1);

    let mut live = Vec::new();
    for response in &responses {
        let value = share_token(response);
        let status = app
            .request("GET", &format!("/api/public/products/{value}"), None, None)
            .await
            .status;
        if status == StatusCode::OK {
            live.push(value);
        }
    }
    assert_eq!(live.len(), 1);
}

#[tokio::test]
async fn test_share_endpoints_require_auth() {
    let app = TestApp::new();

    let response = app.send("POST", "/api/share-links", "", None, &[]).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/share-links/current", None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_resolution_during_outage_is_unavailable() {
    let app = TestApp::new();
    let token = app.merchant().await;
    let value = share_token(&create_link(&app, &token, "").await);

    app.store.set_available(false);
    let response = app
        .request("GET", &format!("/api/public/products/{value}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}
