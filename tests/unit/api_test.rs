//! HTTP-level tests for the JSON API.
//!
//! Requests go through the full router (CORS and trace layers included)
//! against an in-memory database.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use bookmark_hub::api::error::{
    MSG_BAD_BODY, MSG_BOOKMARK_NOT_FOUND, MSG_CREDENTIALS_REQUIRED, MSG_INVALID_CREDENTIALS,
    MSG_INVALID_THEME, MSG_TITLE_URL_REQUIRED, MSG_TOKEN_EXPIRED, MSG_UNAUTHORIZED,
};
use bookmark_hub::api::router;
use bookmark_hub::app::App;
use bookmark_hub::database::Database;
use bookmark_hub::services::auth_gate::AuthGate;
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &[u8] = b"api-test-secret";

fn setup() -> (Router, Arc<App>) {
    let db = Database::open_in_memory().expect("in-memory database");
    let auth = AuthGate::new("admin", "admin123".to_string(), SECRET).expect("auth gate");
    let app = Arc::new(App::with_database(db, auth));
    (router(app.clone()), app)
}

fn token(app: &App) -> String {
    app.auth.sign("admin").expect("sign")
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(router: &Router, token: &str, body: Value) -> Value {
    let (status, value) = send(
        router,
        request(Method::POST, "/api/bookmarks", Some(token), Some(body)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{value}");
    value
}

// ─── Health / CORS ───

#[tokio::test]
async fn health_reports_ok() {
    let (router, _) = setup();
    let (status, body) = send(&router, request(Method::GET, "/api/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn preflight_is_answered_with_cors_headers() {
    let (router, _) = setup();
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/bookmarks")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn unsupported_method_is_405() {
    let (router, _) = setup();
    let (status, _) = send(&router, request(Method::PATCH, "/api/bookmarks", None, None)).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

// ─── Auth ───

#[tokio::test]
async fn login_returns_token_usable_for_verify() {
    let (router, _) = setup();
    let (status, body) = send(
        &router,
        request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "admin", "password": "admin123" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "admin");
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(
        &router,
        request(Method::GET, "/api/auth/verify", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "valid": true, "username": "admin" }));
}

#[tokio::test]
async fn login_with_wrong_password_is_401() {
    let (router, _) = setup();
    let (status, body) = send(
        &router,
        request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "admin", "password": "nope" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], MSG_INVALID_CREDENTIALS);
}

#[tokio::test]
async fn login_without_password_is_400() {
    let (router, _) = setup();
    let (status, body) = send(
        &router,
        request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "admin" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], MSG_CREDENTIALS_REQUIRED);
}

#[tokio::test]
async fn verify_without_token_is_401() {
    let (router, _) = setup();
    let (status, body) = send(&router, request(Method::GET, "/api/auth/verify", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], MSG_UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_rejected_on_writes() {
    let db = Database::open_in_memory().unwrap();
    let auth = AuthGate::new("admin", "admin123".to_string(), SECRET)
        .unwrap()
        .with_ttl(chrono::Duration::seconds(-120));
    let app = Arc::new(App::with_database(db, auth));
    let expired = token(&app);
    let router = router(app);

    let (status, body) = send(
        &router,
        request(
            Method::POST,
            "/api/bookmarks",
            Some(&expired),
            Some(json!({ "title": "A", "url": "https://a.example" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], MSG_TOKEN_EXPIRED);
}

// ─── Bookmarks ───

#[tokio::test]
async fn create_requires_token() {
    let (router, _) = setup();
    let (status, body) = send(
        &router,
        request(
            Method::POST,
            "/api/bookmarks",
            None,
            Some(json!({ "title": "A", "url": "https://a.example" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], MSG_UNAUTHORIZED);
}

#[tokio::test]
async fn create_without_title_is_400() {
    let (router, app) = setup();
    let token = token(&app);
    let (status, body) = send(
        &router,
        request(
            Method::POST,
            "/api/bookmarks",
            Some(&token),
            Some(json!({ "url": "https://a.example" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], MSG_TITLE_URL_REQUIRED);
}

#[tokio::test]
async fn malformed_body_is_400() {
    let (router, app) = setup();
    let token = token(&app);
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/bookmarks")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&router, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], MSG_BAD_BODY);
}

#[tokio::test]
async fn create_returns_camel_case_record() {
    let (router, app) = setup();
    let token = token(&app);
    let body = create(
        &router,
        &token,
        json!({ "title": "Rust", "url": "https://rust-lang.org", "category": "Dev" }),
    )
    .await;
    assert_eq!(body["title"], "Rust");
    assert_eq!(body["category"], "Dev");
    assert_eq!(body["order"], 0);
    assert_eq!(body["visible"], true);
    assert!(body["createdAt"].is_i64());
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn hidden_bookmarks_only_listed_for_admin() {
    let (router, app) = setup();
    let token = token(&app);
    create(&router, &token, json!({ "title": "Shown", "url": "https://a.example" })).await;
    let hidden = create(
        &router,
        &token,
        json!({ "title": "Hidden", "url": "https://b.example", "visible": false }),
    )
    .await;
    let hidden_uri = format!("/api/bookmarks/{}", hidden["id"].as_str().unwrap());

    let (_, anonymous) = send(&router, request(Method::GET, "/api/bookmarks", None, None)).await;
    assert_eq!(anonymous.as_array().unwrap().len(), 1);

    let (_, admin) = send(
        &router,
        request(Method::GET, "/api/bookmarks", Some(&token), None),
    )
    .await;
    assert_eq!(admin.as_array().unwrap().len(), 2);

    let (status, body) = send(&router, request(Method::GET, &hidden_uri, None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], MSG_BOOKMARK_NOT_FOUND);

    let (status, _) = send(&router, request(Method::GET, &hidden_uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn invalid_token_on_read_is_treated_as_anonymous() {
    let (router, app) = setup();
    let token = token(&app);
    create(
        &router,
        &token,
        json!({ "title": "Hidden", "url": "https://b.example", "visible": false }),
    )
    .await;

    let (status, body) = send(
        &router,
        request(Method::GET, "/api/bookmarks", Some("garbage"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn update_and_delete_bookmark() {
    let (router, app) = setup();
    let token = token(&app);
    let created = create(&router, &token, json!({ "title": "A", "url": "https://a.example" })).await;
    let uri = format!("/api/bookmarks/{}", created["id"].as_str().unwrap());

    let (status, body) = send(
        &router,
        request(Method::PUT, &uri, Some(&token), Some(json!({ "title": "A2", "category": "Dev" }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "A2");
    assert_eq!(body["category"], "Dev");

    let (status, body) = send(&router, request(Method::DELETE, &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, _) = send(&router, request(Method::DELETE, &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn reorder_changes_listing() {
    let (router, app) = setup();
    let token = token(&app);
    let a = create(&router, &token, json!({ "title": "A", "url": "https://a.example" })).await;
    let b = create(&router, &token, json!({ "title": "B", "url": "https://b.example" })).await;

    let (status, _) = send(
        &router,
        request(
            Method::POST,
            "/api/bookmarks/reorder",
            Some(&token),
            Some(json!({ "ids": [b["id"], a["id"]] })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = send(&router, request(Method::GET, "/api/bookmarks", None, None)).await;
    let titles: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["B", "A"]);
}

// ─── Categories ───

#[tokio::test]
async fn category_order_round_trip() {
    let (router, app) = setup();
    let token = token(&app);
    create(&router, &token, json!({ "title": "A", "url": "https://a.example", "category": "Dev" })).await;
    create(&router, &token, json!({ "title": "B", "url": "https://b.example", "category": "News" })).await;

    let (status, _) = send(
        &router,
        request(
            Method::PUT,
            "/api/categories/order",
            Some(&token),
            Some(json!({ "categories": ["News", "Dev"] })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, order) = send(&router, request(Method::GET, "/api/categories/order", None, None)).await;
    assert_eq!(
        order,
        json!([
            { "category": "News", "order": 0 },
            { "category": "Dev", "order": 1 }
        ])
    );

    let (_, categories) = send(&router, request(Method::GET, "/api/categories", None, None)).await;
    assert_eq!(categories, json!(["News", "Dev"]));
}

#[tokio::test]
async fn category_order_requires_token() {
    let (router, _) = setup();
    let (status, _) = send(
        &router,
        request(
            Method::PUT,
            "/api/categories/order",
            None,
            Some(json!({ "categories": ["Dev"] })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ─── Settings ───

#[tokio::test]
async fn settings_default_and_update() {
    let (router, app) = setup();
    let token = token(&app);

    let (status, body) = send(&router, request(Method::GET, "/api/settings", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "theme": "light", "siteTitle": "个人书签", "siteIcon": "🔖" })
    );

    let (status, body) = send(
        &router,
        request(
            Method::PUT,
            "/api/settings",
            Some(&token),
            Some(json!({ "theme": "ocean" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["theme"], "ocean");
    assert_eq!(body["siteTitle"], "个人书签");
}

#[tokio::test]
async fn settings_invalid_theme_is_400() {
    let (router, app) = setup();
    let token = token(&app);
    let (status, body) = send(
        &router,
        request(
            Method::PUT,
            "/api/settings",
            Some(&token),
            Some(json!({ "theme": "neon" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], MSG_INVALID_THEME);

    let (_, body) = send(&router, request(Method::GET, "/api/settings", None, None)).await;
    assert_eq!(body["theme"], "light");
}
