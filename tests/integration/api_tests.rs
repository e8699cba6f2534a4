//! API integration tests against the in-memory store

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use library_server::{
    api,
    repository::{
        self,
        memory::{MemoryStore, Seed},
    },
    AppConfig, AppState,
};

fn app(seed: Seed) -> Router {
    let repository = repository::memory(MemoryStore::with_seed(seed));
    api::create_router(AppState::new(AppConfig::default(), repository))
}

fn scenario_seed() -> Seed {
    Seed::default()
        .patron("Alice", 100)
        .title("000-1", "T1", "A1")
        .copy(5, "000-1")
}

/// Send a request and return the status with the parsed JSON body
async fn send(
    app: &Router,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(format!("/api/v1{}", path));

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn login(app: &Router, name: &str, card_num: i64) -> Option<String> {
    let (status, body) = send(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "name": name, "card_num": card_num })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().map(str::to_string)
}

#[tokio::test]
async fn test_health_check() {
    let app = app(Seed::default());

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, Method::GET, "/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_checkout_and_return_scenario() {
    let app = app(scenario_seed());

    let token = login(&app, "Alice", 100).await.expect("login should succeed");

    let (status, titles) = send(&app, Method::GET, "/titles", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        titles,
        json!([{ "isbn": "000-1", "title": "T1", "author": "A1", "serial": 5, "name": "" }])
    );

    let (status, body) = send(
        &app,
        Method::POST,
        "/loans/checkout",
        Some(&token),
        Some(json!({ "serial": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, titles) = send(&app, Method::GET, "/titles", None, None).await;
    assert_eq!(
        titles,
        json!([{ "isbn": "000-1", "title": "T1", "author": "A1", "serial": 5, "name": "Alice" }])
    );

    let (status, books) = send(&app, Method::GET, "/my-books", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(books, json!([{ "title": "T1", "author": "A1", "serial": 5 }]));

    let (status, body) = send(
        &app,
        Method::POST,
        "/loans/return",
        Some(&token),
        Some(json!({ "serial": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (_, books) = send(&app, Method::GET, "/my-books", Some(&token), None).await;
    assert_eq!(books, json!([]));
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = app(scenario_seed());

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "name": "Alice", "card_num": 101 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": false }));

    assert!(login(&app, "alice", 100).await.is_none());
    assert!(login(&app, "Alice", -1).await.is_none());
}

#[tokio::test]
async fn test_session_and_logout() {
    let app = app(scenario_seed());
    let token = login(&app, "Alice", 100).await.unwrap();

    let (status, body) = send(&app, Method::GET, "/auth/session", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["card_num"], 100);
    assert!(body.get("token").is_none());

    let (status, body) = send(&app, Method::POST, "/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, _) = send(&app, Method::GET, "/auth/session", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Logging out again, or with no session at all, still succeeds
    let (status, body) = send(&app, Method::POST, "/auth/logout", Some(&token), None).await;
    assert_eq!((status, body), (StatusCode::OK, json!({ "success": true })));
    let (status, body) = send(&app, Method::POST, "/auth/logout", None, None).await;
    assert_eq!((status, body), (StatusCode::OK, json!({ "success": true })));
}

#[tokio::test]
async fn test_unauthorized_access() {
    let app = app(scenario_seed());

    let (status, body) = send(&app, Method::GET, "/my-books", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "NotLoggedIn");

    let (status, _) = send(
        &app,
        Method::POST,
        "/loans/checkout",
        None,
        Some(json!({ "serial": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let stranger = uuid::Uuid::new_v4().to_string();
    let (status, _) = send(
        &app,
        Method::POST,
        "/loans/return",
        Some(&stranger),
        Some(json!({ "serial": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/my-books", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // The catalog itself is public
    let (status, _) = send(&app, Method::GET, "/titles", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_checkout_conflicts_and_unknown_copies() {
    let app = app(scenario_seed().patron("Bob", 101));
    let alice = login(&app, "Alice", 100).await.unwrap();
    let bob = login(&app, "Bob", 101).await.unwrap();

    let (status, _) = send(
        &app,
        Method::POST,
        "/loans/checkout",
        Some(&alice),
        Some(json!({ "serial": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::POST,
        "/loans/checkout",
        Some(&bob),
        Some(json!({ "serial": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CopyOnLoan");

    let (status, _) = send(
        &app,
        Method::POST,
        "/loans/checkout",
        Some(&bob),
        Some(json!({ "serial": 99 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Bob returning Alice's copy is a silent no-op
    let (status, body) = send(
        &app,
        Method::POST,
        "/loans/return",
        Some(&bob),
        Some(json!({ "serial": 5 })),
    )
    .await;
    assert_eq!((status, body), (StatusCode::OK, json!({ "success": true })));

    let (_, books) = send(&app, Method::GET, "/my-books", Some(&alice), None).await;
    assert_eq!(books, json!([{ "title": "T1", "author": "A1", "serial": 5 }]));
    let (_, books) = send(&app, Method::GET, "/my-books", Some(&bob), None).await;
    assert_eq!(books, json!([]));
}

#[tokio::test]
async fn test_unstocked_title_lists_with_null_serial() {
    let app = app(scenario_seed().title("000-9", "Dune", "Frank Herbert"));

    let (_, titles) = send(&app, Method::GET, "/titles", None, None).await;
    let titles = titles.as_array().unwrap();
    assert_eq!(titles.len(), 2);

    let dune: Vec<&Value> = titles.iter().filter(|t| t["isbn"] == "000-9").collect();
    assert_eq!(dune.len(), 1);
    assert!(dune[0]["serial"].is_null());
    assert_eq!(dune[0]["name"], "");
}

#[tokio::test]
async fn test_negative_serial_is_rejected_by_body_parsing() {
    let app = app(scenario_seed());
    let token = login(&app, "Alice", 100).await.unwrap();

    let (status, _) = send(
        &app,
        Method::POST,
        "/loans/checkout",
        Some(&token),
        Some(json!({ "serial": -5 })),
    )
    .await;
    assert!(status.is_client_error());
}
