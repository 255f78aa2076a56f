//! End-to-end scenarios driven through the public routers, the same surface the service binary
//! mounts.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use kidcheck::accounts::{account_router, AccountDirectory};
use kidcheck::requests::{request_router, RequestLedger};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    account_router(Arc::new(AccountDirectory::new()))
        .merge(request_router(Arc::new(RequestLedger::new())))
}

async fn call(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("route executes");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    (status, serde_json::from_slice(&body).expect("json payload"))
}

async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    call(
        router,
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds"),
    )
    .await
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    call(
        router,
        Request::get(uri).body(Body::empty()).expect("request builds"),
    )
    .await
}

#[tokio::test]
async fn parent_registers_and_logs_in() {
    let app = app();
    let registration = json!({
        "name": "Jo",
        "email": "jo@x.com",
        "password": "p1",
        "childName": "Kid",
        "userType": "parent"
    });

    let (status, body) = post(&app, "/api/auth/register", registration.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(body["data"].get("password").is_none());
    let account_id = body["data"]["id"].as_str().expect("account id").to_string();

    let (status, body) = post(&app, "/api/auth/register", registration).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "success": false, "error": "User already exists" })
    );

    let (status, body) = post(
        &app,
        "/api/auth/login",
        json!({ "email": "jo@x.com", "password": "p1", "userType": "parent" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], json!(account_id));
    assert!(body["data"].get("password").is_none());

    let (_, body) = post(
        &app,
        "/api/auth/login",
        json!({ "email": "jo@x.com", "password": "nope", "userType": "parent" }),
    )
    .await;
    assert_eq!(
        body,
        json!({ "success": false, "error": "Invalid credentials" })
    );
}

#[tokio::test]
async fn staff_resolves_and_deletes_a_request() {
    let app = app();

    let (status, body) = post(
        &app,
        "/api/requests",
        json!({
            "type": "checkin",
            "childName": "Ann",
            "childGrade": "1",
            "parentEmail": "jo@x.com",
            "parentName": "Jo",
            "requestMessage": "Late drop-off"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("pending"));
    let id = body["data"]["id"].as_str().expect("request id").to_string();

    let (_, body) = get(&app, "/api/requests").await;
    assert_eq!(body["data"][0]["id"], json!(id));

    let (_, body) = get(&app, "/api/requests/stats").await;
    assert_eq!(body["data"], json!({ "pending": 1, "processed": 0, "total": 1 }));

    let (status, body) = post(
        &app,
        "/api/requests/update",
        json!({ "id": id, "status": "approved", "feedback": "ok" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("approved"));
    assert_eq!(body["data"]["feedback"], json!("ok"));

    let (_, body) = get(&app, "/api/requests/stats").await;
    assert_eq!(body["data"], json!({ "pending": 0, "processed": 1, "total": 1 }));

    let (status, _) = post(&app, "/api/requests/delete", json!({ "id": id })).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/api/requests/stats").await;
    assert_eq!(body["data"], json!({ "pending": 0, "processed": 0, "total": 0 }));

    let (status, body) = post(&app, "/api/requests/delete", json!({ "id": id })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn requests_list_newest_first() {
    let app = app();
    let mut ids = Vec::new();
    for child in ["R1", "R2", "R3"] {
        let (_, body) = post(
            &app,
            "/api/requests",
            json!({ "type": "checkout", "childName": child, "parentEmail": "jo@x.com" }),
        )
        .await;
        ids.push(body["data"]["id"].clone());
    }

    let (_, body) = get(&app, "/api/requests").await;
    let listed: Vec<Value> = body["data"]
        .as_array()
        .expect("array payload")
        .iter()
        .map(|request| request["id"].clone())
        .collect();
    ids.reverse();
    assert_eq!(listed, ids);
}
