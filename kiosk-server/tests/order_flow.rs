//! HTTP 订单流程测试 (Router + oneshot，无网络)

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use kiosk_server::api::build_app;
use kiosk_server::{Config, ServerState};
use serde_json::{Value, json};
use tower::ServiceExt;

fn app_with(config: Config) -> Router {
    build_app(ServerState::initialize(&config).unwrap())
}

fn app(capacity: usize) -> Router {
    let mut config = Config::for_stores(["tokyo", "osaka"], capacity);
    config.rate_limit.max_requests = 10_000;
    app_with(config)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    send_from(app, method, uri, body, "198.51.100.1").await
}

async fn send_from(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    ip: &str,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-forwarded-for", ip);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn create(app: &Router, store: &str, item: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        &format!("/v1/stores/{store}/orders"),
        Some(json!({ "menu_item_id": item })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body
}

#[tokio::test]
async fn test_health() {
    let app = app(5);
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "kiosk-server");
}

#[tokio::test]
async fn test_detailed_health_reports_stores() {
    let app = app(5);
    create(&app, "tokyo", "giiku-sai").await;

    let (status, body) = send(&app, "GET", "/health/detailed", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stores"][0]["id"], "tokyo");
    assert_eq!(body["stores"][0]["orders"], 1);
    assert_eq!(body["stores"][0]["capacity"], 5);
    assert_eq!(body["stores"][1]["orders"], 0);
    assert_eq!(body["blocked_clients"], 0);
}

#[tokio::test]
async fn test_menu() {
    let app = app(5);
    let (status, body) = send(&app, "GET", "/v1/stores/tokyo/menu", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["menu"].as_array().unwrap().len(), 4);
    assert_eq!(body["menu"][0]["id"], "giiku-sai");

    let (status, body) = send(&app, "GET", "/v1/stores/nagoya/menu", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Store not found");
}

#[tokio::test]
async fn test_order_lifecycle() {
    let app = app(5);
    let order = create(&app, "tokyo", "giiku-haku").await;
    assert_eq!(order["id"], "tokyo-1");
    assert_eq!(order["order_number"], 1);
    assert_eq!(order["menu_name"], "Expo Melon");
    assert_eq!(order["status"], "pending");
    assert!(order["created_at"].is_string());

    let (status, body) = send(&app, "POST", "/v1/stores/tokyo/orders/tokyo-1/complete", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "order status is not waiting pickup");

    let (status, body) = send(
        &app,
        "POST",
        "/v1/stores/tokyo/orders/tokyo-1/waiting-pickup",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "waitingPickup");

    let (status, body) = send(
        &app,
        "POST",
        "/v1/stores/tokyo/orders/tokyo-1/waiting-pickup",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "order status is not pending");

    let (status, body) = send(&app, "POST", "/v1/stores/tokyo/orders/tokyo-1/complete", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");

    let (status, body) = send(&app, "GET", "/v1/stores/tokyo/orders/tokyo-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");
}

#[tokio::test]
async fn test_list_evicts_oldest_and_sorts() {
    let app = app(2);
    create(&app, "osaka", "giiku-sai").await;
    create(&app, "osaka", "giiku-ten").await;
    create(&app, "osaka", "giiku-camp").await;

    let (status, body) = send(&app, "GET", "/v1/stores/osaka/orders", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["orders"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["osaka-2", "osaka-3"]);

    let (status, _) = send(&app, "GET", "/v1/stores/osaka/orders/osaka-1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/v1/stores/tokyo/orders", None).await;
    assert!(body["orders"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_errors() {
    let app = app(5);

    let (status, _) = send(
        &app,
        "POST",
        "/v1/stores/nagoya/orders",
        Some(json!({ "menu_item_id": "giiku-sai" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        "POST",
        "/v1/stores/tokyo/orders",
        Some(json!({ "menu_item_id": "matcha" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6001);

    let (status, body) = send(&app, "POST", "/v1/stores/tokyo/orders", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "menu_item_id must not be empty");

    let (status, body) = send(&app, "POST", "/v1/stores/tokyo/orders", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid request body");
}

#[tokio::test]
async fn test_invalid_order_id() {
    let app = app(5);
    create(&app, "tokyo", "giiku-sai").await;

    let (status, body) = send(&app, "GET", "/v1/stores/tokyo/orders/osaka-1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid order ID format");

    let (status, _) = send(&app, "POST", "/v1/stores/tokyo/orders/tokyo-/complete", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = app(5);
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/v1/stores/tokyo/orders")
        .header(header::ORIGIN, "http://kiosk.local")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "86400");
}

#[tokio::test]
async fn test_rate_limit_bans_client() {
    let mut config = Config::for_stores(["tokyo"], 5);
    config.rate_limit.max_requests = 2;
    config.rate_limit.window = std::time::Duration::from_secs(60);
    let app = app_with(config);

    let uri = "/v1/stores/tokyo/menu";
    assert_eq!(send_from(&app, "GET", uri, None, "203.0.113.9").await.0, StatusCode::OK);
    assert_eq!(send_from(&app, "GET", uri, None, "203.0.113.9").await.0, StatusCode::OK);

    let (status, body) = send_from(&app, "GET", uri, None, "203.0.113.9").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "IP address has been blocked for 3 hours due to excessive requests"
    );

    let (status, body) = send_from(&app, "GET", uri, None, "203.0.113.9").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Your IP address is blocked. Block will be lifted in")
    );

    // 其他客户端与健康检查不受影响
    assert_eq!(send_from(&app, "GET", uri, None, "203.0.113.10").await.0, StatusCode::OK);
    assert_eq!(send_from(&app, "GET", "/health", None, "203.0.113.9").await.0, StatusCode::OK);

    let (_, body) = send_from(&app, "GET", "/health/detailed", None, "203.0.113.9").await;
    assert_eq!(body["blocked_clients"], 1);
}
