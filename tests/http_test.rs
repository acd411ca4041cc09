#![allow(clippy::indexing_slicing)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use axum::body::Body;
use axum::Router;
use collectify::server::build_router;
use common::test_context;
use http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app(recycle_bin: bool) -> Router {
    build_router(test_context(recycle_bin).await, vec!["*".to_string()])
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Value {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = app(true).await;
    let body = call(&app, Method::GET, "/api/health", None).await;
    assert_eq!(body, json!({ "code": 0, "msg": "success", "data": "ok" }));
}

#[tokio::test]
async fn test_category_create_and_duplicate_envelope() {
    let app = app(true).await;
    let created = call(
        &app,
        Method::POST,
        "/api/category",
        Some(json!({ "name": "Books" })),
    )
    .await;
    assert_eq!(created["code"], 0);
    let id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["fields"], json!([]));

    let dup = call(
        &app,
        Method::POST,
        "/api/category",
        Some(json!({ "name": "Books" })),
    )
    .await;
    assert_eq!(dup["code"], 1);
    assert_eq!(dup["error"]["code"], "DUPLICATED");
    assert_eq!(dup["data"], json!({ "id": id, "isDeleted": false }));
}

#[tokio::test]
async fn test_malformed_body_and_bad_ids_are_invalid_params() {
    let app = app(true).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/tag")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], 1);
    assert_eq!(body["error"]["code"], "INVALID_PARAMS");

    for uri in ["/api/item/0", "/api/item/abc"] {
        let body = call(&app, Method::GET, uri, None).await;
        assert_eq!(body["error"]["code"], "INVALID_PARAMS", "{uri}");
    }
}

#[tokio::test]
async fn test_item_flow_over_http() {
    let app = app(true).await;
    let category = call(
        &app,
        Method::POST,
        "/api/category",
        Some(json!({ "name": "Books" })),
    )
    .await;
    let category_id = category["data"]["id"].as_i64().unwrap();
    let field = call(
        &app,
        Method::POST,
        "/api/field",
        Some(json!({ "category_id": category_id, "name": "pages", "type": 2 })),
    )
    .await;
    let field_id = field["data"]["id"].as_i64().unwrap();
    assert_eq!(field["data"]["type"], 2);

    let item = call(
        &app,
        Method::POST,
        "/api/item",
        Some(json!({
            "category_id": category_id,
            "item": {
                "title": "Dune",
                "status": 5,
                "values": [{ "field_id": field_id, "value": 412 }]
            }
        })),
    )
    .await;
    assert_eq!(item["code"], 0, "{item}");
    let item_id = item["data"]["id"].as_i64().unwrap();
    assert_eq!(item["data"]["status"], 5);
    assert!(item["data"]["completed_at"].is_string());
    assert_eq!(item["data"]["values"][0]["value"], 412);

    let found = call(
        &app,
        Method::POST,
        "/api/item/search",
        Some(json!({ "category_id": category_id, "filters": { field_id.to_string(): 412 } })),
    )
    .await;
    assert_eq!(found["data"]["total"], 1);
    assert_eq!(found["data"]["list"][0]["id"], item_id);

    let deleted = call(&app, Method::DELETE, &format!("/api/item/{item_id}"), None).await;
    assert_eq!(deleted, json!({ "code": 0, "msg": "success" }));

    let bin = call(&app, Method::GET, "/api/recycle-bin/list?type=item", None).await;
    assert_eq!(bin["data"]["total"], 1);

    let restored = call(
        &app,
        Method::POST,
        "/api/recycle-bin/restore",
        Some(json!({ "list": [{ "id": item_id, "type": "item" }] })),
    )
    .await;
    assert_eq!(restored["data"]["restored"], 1);

    let fetched = call(&app, Method::GET, &format!("/api/item/{item_id}"), None).await;
    assert_eq!(fetched["data"]["title"], "Dune");
}

#[tokio::test]
async fn test_unknown_recycle_bin_type_is_invalid() {
    let app = app(true).await;
    let body = call(&app, Method::GET, "/api/recycle-bin/list?type=widget", None).await;
    assert_eq!(body["code"], 1);
    assert_eq!(body["error"]["code"], "INVALID_PARAMS");
}
