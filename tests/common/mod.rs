#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use kanban::{routes::build_router, test_utils::test_helpers, AppState};
use serde_json::Value;
use tower::ServiceExt; // for `oneshot`

/// Base URL for states whose pages are never exercised.
pub const UNUSED_BASE_URL: &str = "http://127.0.0.1:9";

pub async fn setup() -> (Router, AppState) {
    let pool = test_helpers::create_test_db()
        .await
        .expect("Failed to create test database");
    let state =
        test_helpers::test_state(pool, UNUSED_BASE_URL).expect("Failed to build app state");
    (build_router(state.clone()), state)
}

pub fn json_request(
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    builder.body(body).expect("request to build")
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone()
        .oneshot(request)
        .await
        .expect("router to respond")
}

pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body to read");
    serde_json::from_slice(&bytes).expect("body to be JSON")
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body to read");
    String::from_utf8(bytes.to_vec()).expect("body to be UTF-8")
}

/// `name=value` of the `user_id` cookie set by a response, if any.
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("user_id="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

pub async fn register(app: &Router, fullname: &str, email: &str, password: &str) -> i64 {
    let response = send(
        app,
        json_request(
            Method::POST,
            "/api/v1/users/register",
            None,
            Some(serde_json::json!({
                "fullname": fullname,
                "email": email,
                "password": password,
            })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["user_id"]
        .as_i64()
        .expect("user_id in register response")
}

pub async fn login(app: &Router, email: &str, password: &str) -> String {
    let response = send(
        app,
        json_request(
            Method::POST,
            "/api/v1/users/login",
            None,
            Some(serde_json::json!({ "email": email, "password": password })),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response).expect("login to set the session cookie")
}

/// Register `email` and return its id with a logged-in cookie.
pub async fn signed_in_user(app: &Router, email: &str) -> (i64, String) {
    let user_id = register(app, "Test User", email, "password123").await;
    let cookie = login(app, email, "password123").await;
    (user_id, cookie)
}
