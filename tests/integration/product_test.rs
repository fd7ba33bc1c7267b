//! Integration tests for product CRUD and the dashboard.

mod helpers;

use axum::http::StatusCode;
use serde_json::{Value, json};

use helpers::TestApp;

fn rice() -> Value {
    json!({
        "id": "sku-2",
        "name": "Rice",
        "category": "Grains",
        "stock": 10,
        "unit": "kg",
        "reorderPoint": 2,
        "price": 1.5,
        "imageUrl": "https://img.test/rice.png"
    })
}

fn beans() -> Value {
    json!({
        "id": "sku-1",
        "name": "Beans",
        "category": "Legumes",
        "stock": "3",
        "unit": "kg",
        "reorderPoint": "3",
        "price": "2.25"
    })
}

#[tokio::test]
async fn test_create_and_list_products() {
    let app = TestApp::new();
    let token = app.merchant().await;

    let created = app.create_product(&token, rice()).await;
    assert_eq!(created["id"], "sku-2");
    assert_eq!(created["reorderPoint"], 2);
    assert_eq!(created["imageUrl"], "https://img.test/rice.png");
    assert!(created.get("ownerId").is_none());
    assert!(created.get("owner_id").is_none());

    let created = app.create_product(&token, beans()).await;
    assert_eq!(created["stock"], 3);
    assert_eq!(created["price"], 2.25);
    assert!(created["imageUrl"].is_null());

    let response = app.request("GET", "/api/products", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let ids: Vec<&str> = response.body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["sku-1", "sku-2"]);
}

#[tokio::test]
async fn test_create_validation() {
    let app = TestApp::new();
    let token = app.merchant().await;

    let response = app
        .request(
            "POST",
            "/api/products",
            Some(json!({ "id": "sku-1", "name": "Rice" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.message().starts_with("Missing required fields"));
    assert!(response.message().contains("reorderPoint"));

    let mut bad_price = rice();
    bad_price["price"] = json!("cheap");
    let response = app
        .request("POST", "/api/products", Some(bad_price), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");

    let mut negative = rice();
    negative["price"] = json!(-1);
    let response = app
        .request("POST", "/api/products", Some(negative), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let mut blank = rice();
    blank["name"] = json!("   ");
    let response = app
        .request("POST", "/api/products", Some(blank), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_product_id_conflicts() {
    let app = TestApp::new();
    let token = app.merchant().await;
    app.create_product(&token, rice()).await;

    let response = app
        .request("POST", "/api/products", Some(rice()), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    // Product ids are scoped per merchant.
    let other = app.merchant().await;
    app.create_product(&other, rice()).await;
}

#[tokio::test]
async fn test_sparse_update_keeps_other_fields() {
    let app = TestApp::new();
    let token = app.merchant().await;
    app.create_product(&token, rice()).await;

    let response = app
        .request(
            "PUT",
            "/api/products/sku-2",
            Some(json!({ "stock": 4 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["stock"], 4);
    assert_eq!(response.body["name"], "Rice");
    assert_eq!(response.body["price"], 1.5);
    assert_eq!(response.body["imageUrl"], "https://img.test/rice.png");

    let response = app
        .request(
            "PUT",
            "/api/products/sku-2",
            Some(json!({ "imageUrl": "" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["imageUrl"].is_null());
    assert_eq!(response.body["stock"], 4);
}

#[tokio::test]
async fn test_update_rejects_empty_and_unknown() {
    let app = TestApp::new();
    let token = app.merchant().await;
    app.create_product(&token, rice()).await;

    let response = app
        .request("PUT", "/api/products/sku-2", Some(json!({})), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "No fields provided to update");

    let response = app
        .request(
            "PUT",
            "/api/products/missing",
            Some(json!({ "stock": 1 })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_product() {
    let app = TestApp::new();
    let token = app.merchant().await;
    app.create_product(&token, rice()).await;

    let response = app
        .request("DELETE", "/api/products/sku-2", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app
        .request("DELETE", "/api/products/sku-2", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "NOT_FOUND");

    let response = app.request("GET", "/api/products", None, Some(&token)).await;
    assert_eq!(response.body["products"], json!([]));
}

#[tokio::test]
async fn test_merchants_cannot_touch_each_others_products() {
    let app = TestApp::new();
    let owner = app.merchant().await;
    let intruder = app.merchant().await;
    app.create_product(&owner, rice()).await;

    let response = app
        .request("GET", "/api/products", None, Some(&intruder))
        .await;
    assert_eq!(response.body["products"], json!([]));

    let response = app
        .request(
            "PUT",
            "/api/products/sku-2",
            Some(json!({ "stock": 0 })),
            Some(&intruder),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("DELETE", "/api/products/sku-2", None, Some(&intruder))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_products_require_auth() {
    let app = TestApp::new();

    for (method, path) in [
        ("GET", "/api/products"),
        ("POST", "/api/products"),
        ("PUT", "/api/products/sku-1"),
        ("DELETE", "/api/products/sku-1"),
        ("GET", "/api/dashboard"),
    ] {
        let response = app.request(method, path, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{method} {path}");
    }
}

#[tokio::test]
async fn test_dashboard_summary() {
    let app = TestApp::new();
    let token = app.merchant().await;
    app.create_product(&token, rice()).await;
    app.create_product(&token, beans()).await;
    app.create_product(
        &token,
        json!({
            "id": "sku-3",
            "name": "Lentils",
            "category": "Legumes",
            "stock": 1,
            "unit": "kg",
            "reorderPoint": 5,
            "price": 4
        }),
    )
    .await;

    let response = app.request("GET", "/api/dashboard", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let body = &response.body;
    assert_eq!(body["totalProducts"], 3);
    assert_eq!(body["totalStock"], 14);
    // 10 * 1.5 + 3 * 2.25 + 1 * 4
    assert_eq!(body["totalValue"], 25.75);

    let low: Vec<&str> = body["lowStock"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(low, vec!["sku-1", "sku-3"]);

    assert_eq!(body["categories"]["Grains"]["items"], 1);
    assert_eq!(body["categories"]["Legumes"]["items"], 2);
    assert_eq!(body["categories"]["Legumes"]["stock"], 4);
    assert_eq!(body["categories"]["Legumes"]["value"], 10.75);
}

#[tokio::test]
async fn test_store_outage_hides_details() {
    let app = TestApp::new();
    let token = app.merchant().await;
    app.store.set_available(false);

    let response = app.request("GET", "/api/products", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.error_code(), "SERVICE_UNAVAILABLE");
    assert_eq!(response.message(), "Database is unavailable");
}
