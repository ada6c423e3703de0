//! Router-level tests for catalog, auth, cart, order and admin endpoints.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use nexus_commerce::checkout::{BernoulliSampler, CheckoutConfig};
use nexus_commerce::store::InMemoryKv;
use nexus_commerce::{api, AppState};

fn test_app() -> Router {
    let config = CheckoutConfig {
        primary_failure_rate: 0.0,
        primary_delay: Duration::from_millis(5),
        fallback_delay: Duration::from_millis(5),
        ..CheckoutConfig::default()
    };
    let sampler = Arc::new(BernoulliSampler::seeded(0.0, 7));
    api::app(AppState::new(config, sampler, Arc::new(InMemoryKv::default())))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn approx(value: &Value, expected: f64) -> bool {
    value.as_f64().is_some_and(|v| (v - expected).abs() < 1e-6)
}

#[tokio::test]
async fn root_and_health() {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Nexus E-Commerce API");
    assert_eq!(body["endpoints"]["auth"], "/api/auth/login");

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn catalog_listing_and_lookup() {
    let app = test_app();

    let (status, body) = send(&app, "GET", "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 6);

    let (status, body) = send(&app, "GET", "/api/products/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Pro Noise-Cancelling Headphones");
    assert!(approx(&body["price"], 299.99));
    assert_eq!(body["variants"][2]["priceModifier"], json!(50.0));
    assert_eq!(body["variants"][2]["sku"], "HP-GLD");

    let (status, body) = send(&app, "GET", "/api/products/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
}

#[tokio::test]
async fn related_products() {
    let app = test_app();

    // Electronics has three entries; asking about one leaves the other two.
    let (_, body) = send(&app, "GET", "/api/products/1/related", None).await;
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["3", "5"]);

    // The only Furniture entry falls back to the first three products.
    let (_, body) = send(&app, "GET", "/api/products/2/related", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (_, body) = send(&app, "GET", "/api/products/999/related", None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn login_known_and_unknown_email() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "  User@Nexus.com " })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], "u2");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["token"].as_str().unwrap().starts_with("jwt_token_u2_"));

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "email": "nobody@nexus.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");

    // Failed login leaves session state untouched.
    let (_, cart) = send(&app, "GET", "/api/cart/s1", None).await;
    assert_eq!(cart["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn cart_merging_variants_and_removal() {
    let app = test_app();

    for _ in 0..2 {
        let (status, _) = send(
            &app,
            "POST",
            "/api/cart/s1",
            Some(json!({ "productId": "1", "variantId": "v1_3" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, cart) = send(&app, "GET", "/api/cart/s1", None).await;
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["items"][0]["quantity"], 2);
    // (299.99 + 50) * 2
    assert!(approx(&cart["subtotal"], 699.98));

    // Same product, different variant: a distinct line.
    send(
        &app,
        "POST",
        "/api/cart/s1",
        Some(json!({ "productId": "1", "variantId": "v1_1" })),
    )
    .await;
    let (_, cart) = send(&app, "GET", "/api/cart/s1", None).await;
    assert_eq!(cart["items"].as_array().unwrap().len(), 2);

    // Quantity zero removes a line.
    let (status, cart) = send(
        &app,
        "PUT",
        "/api/cart/s1",
        Some(json!({ "productId": "1", "quantity": 0, "variantId": "v1_3" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["items"][0]["selectedVariantId"], "v1_1");

    let (status, _) = send(&app, "DELETE", "/api/cart/s1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, cart) = send(&app, "GET", "/api/cart/s1", None).await;
    assert_eq!(cart["items"].as_array().unwrap().len(), 0);

    let (status, _) = send(
        &app,
        "POST",
        "/api/cart/s1",
        Some(json!({ "productId": "does-not-exist" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn order_creation_endpoint() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "userId": "u2",
            "items": [],
            "total": 108.0,
            "currency": "USD",
            "shippingAddress": {
                "fullName": "John Doe",
                "street": "123 Main St",
                "city": "New York",
                "state": "NY",
                "zip": "10001",
                "country": "USA"
            },
            "paymentGateway": "COD"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].as_str().unwrap().starts_with("ord_"));
    assert_eq!(body["status"], "processing");
    assert_eq!(body["paymentGateway"], "COD");
    let timeline = body["timeline"].as_array().unwrap();
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline[0]["status"], "created");
    assert_eq!(timeline[0]["description"], "Order created via COD");

    // Newest first, ahead of the seeded delivered order.
    let (_, orders) = send(&app, "GET", "/api/orders", None).await;
    let orders = orders.as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["id"], body["id"]);
    assert_eq!(orders[1]["id"], "ord_123");
}

#[tokio::test]
async fn admin_product_crud() {
    let app = test_app();

    let (status, created) = send(
        &app,
        "POST",
        "/api/admin/products",
        Some(json!({ "name": "USB-C Hub", "price": 49.99, "category": "Electronics" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("p_"));
    assert_eq!(created["rating"], 0.0);

    // Visible to the storefront catalog immediately.
    let (_, products) = send(&app, "GET", "/api/products", None).await;
    assert_eq!(products.as_array().unwrap().len(), 7);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/admin/products/{id}"),
        Some(json!({ "name": "USB-C Hub Pro" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "USB-C Hub Pro");
    assert!(approx(&updated["price"], 49.99), "untouched fields survive");

    let (status, _) = send(&app, "DELETE", &format!("/api/admin/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/admin/products/unknown",
        Some(json!({ "name": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_stats_rollup() {
    let app = test_app();

    let (status, stats) = send(&app, "GET", "/api/admin/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalOrders"], 1);
    assert_eq!(stats["totalUsers"], 2);
    assert!(approx(&stats["totalSales"], 299.99));
    assert_eq!(stats["recentOrders"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn settings_round_trip() {
    let app = test_app();

    let (status, settings) = send(&app, "GET", "/api/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["currency"], "USD");
    assert!(approx(&settings["exchangeRates"]["TRY"], 32.50));

    let (status, settings) = send(
        &app,
        "PUT",
        "/api/settings",
        Some(json!({ "currency": "EUR" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["currency"], "EUR");
}
