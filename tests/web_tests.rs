mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{body_text, send, setup, signed_in_user};

fn page(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request to build")
}

#[tokio::test]
async fn test_landing_page_names_the_app() {
    let (app, _) = setup().await;

    let response = send(&app, page("/")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Kanban App"));
}

#[tokio::test]
async fn test_auth_forms_render() {
    let (app, _) = setup().await;

    let login = body_text(send(&app, page("/login")).await).await;
    assert!(login.contains("Login"));
    assert!(login.contains(r#"action="/login/process""#));

    let register = body_text(send(&app, page("/register")).await).await;
    assert!(register.contains("Register"));
    assert!(register.contains(r#"name="fullname""#));
}

#[tokio::test]
async fn test_logout_clears_cookie_and_redirects() {
    let (app, _) = setup().await;

    let response = send(&app, page("/logout")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("removal cookie issued");
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_protected_pages_redirect_anonymous_visitors() {
    let (app, _) = setup().await;

    for uri in [
        "/dashboard",
        "/category/add",
        "/task/add?category=1",
        "/task/update?task_id=1",
        "/task/move?task_id=1&category_id=2",
        "/task/delete?task_id=1",
        "/category/delete?category_id=1",
    ] {
        let response = send(&app, page(uri)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/login");
    }
}

#[tokio::test]
async fn test_form_pages_render_for_signed_in_user() {
    let (app, _) = setup().await;
    let (_, cookie) = signed_in_user(&app, "jane@example.com").await;

    let response = send(
        &app,
        Request::builder()
            .uri("/category/add")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Add Category"));

    let response = send(
        &app,
        Request::builder()
            .uri("/task/add?category=3")
            .header(header::COOKIE, &cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(r#"name="category" value="3""#));
}

#[tokio::test]
async fn test_page_routes_answer_only_their_verb() {
    let (app, _) = setup().await;

    let response = send(
        &app,
        Request::builder()
            .method(Method::GET)
            .uri("/login/process")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
