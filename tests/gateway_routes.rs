//! End-to-end tests of the gateway's pass-through behaviour.

use axum::http::StatusCode;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_list_products_passthrough() {
    let upstream_body = json!([{"id": 1, "name": "Widget"}]);
    let (product_addr, recorded) = common::start_json_backend(200, upstream_body.clone()).await;
    let gateway = common::start_gateway(common::gateway_config(product_addr, common::unused_addr())).await;

    let res = common::client().get(gateway.url("/api/products")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), upstream_body);

    let seen = recorded.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, "GET");
    assert_eq!(seen[0].path, "/products");

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_get_order_uses_identifier_verbatim() {
    let (order_addr, recorded) = common::start_json_backend(200, json!({"id": "ord-7", "qty": 1})).await;
    let gateway = common::start_gateway(common::gateway_config(common::unused_addr(), order_addr)).await;

    let res = common::client().get(gateway.url("/api/orders/ord-7")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"id": "ord-7", "qty": 1}));
    assert_eq!(recorded.lock().unwrap()[0].path, "/orders/ord-7");

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_create_order_forwards_body_and_reports_201() {
    let created = json!({"id": 42, "item": "x", "qty": 2});
    let (order_addr, recorded) = common::start_json_backend(201, created.clone()).await;
    let gateway = common::start_gateway(common::gateway_config(common::unused_addr(), order_addr)).await;

    let res = common::client()
        .post(gateway.url("/api/orders"))
        .json(&json!({"item": "x", "qty": 2}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.json::<Value>().await.unwrap(), created);

    let seen = recorded.lock().unwrap().clone();
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].path, "/orders");
    assert_eq!(seen[0].header("content-type"), Some("application/json"));
    assert_eq!(seen[0].json(), json!({"item": "x", "qty": 2}));

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_create_product_reports_201_even_when_upstream_says_200() {
    let (product_addr, _) = common::start_json_backend(200, json!({"id": 9, "name": "Gadget"})).await;
    let gateway = common::start_gateway(common::gateway_config(product_addr, common::unused_addr())).await;

    let res = common::client()
        .post(gateway.url("/api/products"))
        .json(&json!({"name": "Gadget"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({"id": 9, "name": "Gadget"}));

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_health_is_wrapped() {
    let (product_addr, recorded) = common::start_json_backend(200, json!({"status": "UP"})).await;
    let gateway = common::start_gateway(common::gateway_config(product_addr, common::unused_addr())).await;

    let res = common::client().get(gateway.url("/api/health/products")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({"status": "healthy", "service": "product-api", "details": {"status": "UP"}})
    );
    assert_eq!(recorded.lock().unwrap()[0].path, "/health");

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_request_id_forwarded_upstream() {
    let (product_addr, recorded) = common::start_json_backend(200, json!([])).await;
    let gateway = common::start_gateway(common::gateway_config(product_addr, common::unused_addr())).await;

    let res = common::client()
        .get(gateway.url("/api/products"))
        .header("x-request-id", "trace-123")
        .send()
        .await
        .unwrap();

    assert_eq!(res.headers().get("x-request-id").unwrap(), "trace-123");
    assert_eq!(recorded.lock().unwrap()[0].header("x-request-id"), Some("trace-123"));

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_repeated_gets_are_identical() {
    let (order_addr, recorded) = common::start_json_backend(200, json!([{"id": 1}, {"id": 2}])).await;
    let gateway = common::start_gateway(common::gateway_config(common::unused_addr(), order_addr)).await;
    let client = common::client();

    let first: Value = client.get(gateway.url("/api/orders")).send().await.unwrap().json().await.unwrap();
    let second: Value = client.get(gateway.url("/api/orders")).send().await.unwrap().json().await.unwrap();

    assert_eq!(first, second);
    // No caching: both calls reached the upstream.
    assert_eq!(recorded.lock().unwrap().len(), 2);

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_local_endpoints_ignore_upstreams() {
    let gateway = common::start_gateway(common::gateway_config(common::unused_addr(), common::unused_addr())).await;
    let client = common::client();

    let health = client.get(gateway.url("/health")).send().await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(health.json::<Value>().await.unwrap()["status"], "UP");

    let ready = client.get(gateway.url("/ready")).send().await.unwrap();
    assert_eq!(ready.status(), StatusCode::OK);
    assert_eq!(ready.json::<Value>().await.unwrap()["ready"], true);

    let missing = client.get(gateway.url("/nonexistent-path")).send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(missing.json::<Value>().await.unwrap()["path"], "/nonexistent-path");

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_create_without_json_body_forwards_empty_object() {
    let (product_addr, recorded) = common::start_json_backend(201, json!({"id": 5})).await;
    let gateway = common::start_gateway(common::gateway_config(product_addr, common::unused_addr())).await;
    let client = common::client();

    let bare = client.post(gateway.url("/api/products")).send().await.unwrap();
    assert_eq!(bare.status(), StatusCode::CREATED);
    assert_eq!(bare.json::<Value>().await.unwrap(), json!({"id": 5}));

    let empty_json = client
        .post(gateway.url("/api/products"))
        .header("content-type", "application/json")
        .send()
        .await
        .unwrap();
    assert_eq!(empty_json.status(), StatusCode::CREATED);

    let plain_text = client
        .post(gateway.url("/api/products"))
        .header("content-type", "text/plain")
        .body("name=Widget")
        .send()
        .await
        .unwrap();
    assert_eq!(plain_text.status(), StatusCode::CREATED);

    let seen = recorded.lock().unwrap().clone();
    assert_eq!(seen.len(), 3);
    for request in &seen {
        assert_eq!(request.method, "POST");
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.json(), json!({}));
    }

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_unparseable_json_body_never_reaches_upstream() {
    let (order_addr, recorded) = common::start_json_backend(201, json!({"id": 1})).await;
    let gateway = common::start_gateway(common::gateway_config(common::unused_addr(), order_addr)).await;

    let res = common::client()
        .post(gateway.url("/api/orders"))
        .header("content-type", "application/json; charset=utf-8")
        .body("{\"item\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json::<Value>().await.unwrap()["error"], "Internal Server Error");
    assert!(recorded.lock().unwrap().is_empty());

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_identifier_keeps_segment_legal_characters() {
    let (order_addr, recorded) = common::start_json_backend(200, json!({"id": "sku:12@v1!"})).await;
    let gateway = common::start_gateway(common::gateway_config(common::unused_addr(), order_addr)).await;

    let res = common::client().get(gateway.url("/api/orders/sku:12@v1!")).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(recorded.lock().unwrap()[0].path, "/orders/sku:12@v1!");

    gateway.shutdown.trigger();
}
