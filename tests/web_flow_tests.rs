//! Browser-style flows against a real listener
//!
//! Pages call the JSON API over loopback, so these tests bind
//! `127.0.0.1:0` and point the API client at it.

use kanban::{routes::build_router, test_utils::test_helpers};
use reqwest::{header, redirect::Policy, Client, Response, StatusCode};
use serde_json::Value;
use tempfile::NamedTempFile;

struct TestApp {
    base_url: String,
    http: Client,
    _db: NamedTempFile,
}

impl TestApp {
    async fn spawn() -> Self {
        let (pool, db) = test_helpers::create_test_db_file()
            .await
            .expect("Failed to create test database");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let state = test_helpers::test_state(pool, &base_url).expect("Failed to build app state");
        let app = build_router(state);
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server to run");
        });

        let http = Client::builder()
            .redirect(Policy::none())
            .build()
            .expect("client to build");

        TestApp {
            base_url,
            http,
            _db: db,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_form(&self, path: &str, cookie: Option<&str>, form: &[(&str, &str)]) -> Response {
        let mut request = self.http.post(self.url(path)).form(form);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        request.send().await.expect("request to succeed")
    }

    async fn get_page(&self, path: &str, cookie: &str) -> Response {
        self.http
            .get(self.url(path))
            .header(header::COOKIE, cookie)
            .send()
            .await
            .expect("request to succeed")
    }

    async fn api_get(&self, path: &str, cookie: &str) -> Value {
        self.http
            .get(self.url(path))
            .header(header::COOKIE, cookie)
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .expect("request to succeed")
            .json()
            .await
            .expect("JSON body")
    }

    async fn category_ids(&self, cookie: &str) -> Vec<i64> {
        self.api_get("/api/v1/categories/get", cookie)
            .await
            .as_array()
            .expect("category list")
            .iter()
            .filter_map(|c| c["id"].as_i64())
            .collect()
    }

    async fn register(&self, email: &str) -> String {
        let response = self
            .post_form(
                "/register/process",
                None,
                &[("fullname", "Jane Doe"), ("email", email), ("password", "secret")],
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/dashboard");
        session_cookie(&response).expect("register to sign the user in")
    }
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

fn set_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("user_id="))
        .map(str::to_string)
}

fn session_cookie(response: &Response) -> Option<String> {
    set_cookie(response).and_then(|v| v.split(';').next().map(str::to_string))
}

#[tokio::test]
async fn test_register_page_signs_in_for_a_year() {
    let app = TestApp::spawn().await;

    let response = app
        .post_form(
            "/register/process",
            None,
            &[
                ("fullname", "Jane Doe"),
                ("email", "jane@example.com"),
                ("password", "secret"),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    assert!(set_cookie(&response)
        .expect("cookie issued")
        .contains("Max-Age=31536000"));
}

#[tokio::test]
async fn test_failed_register_returns_to_form() {
    let app = TestApp::spawn().await;
    app.register("jane@example.com").await;

    let response = app
        .post_form(
            "/register/process",
            None,
            &[
                ("fullname", "Copycat"),
                ("email", "jane@example.com"),
                ("password", "secret"),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/register");
    assert!(set_cookie(&response).is_none());
}

#[tokio::test]
async fn test_login_page_flow() {
    let app = TestApp::spawn().await;
    app.register("jane@example.com").await;

    let response = app
        .post_form(
            "/login/process",
            None,
            &[("email", "jane@example.com"), ("password", "wrong")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(set_cookie(&response).is_none());

    let response = app
        .post_form(
            "/login/process",
            None,
            &[("email", "jane@example.com"), ("password", "secret")],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    let cookie = session_cookie(&response).expect("login cookie");

    let dashboard = app.get_page("/dashboard", &cookie).await;
    assert_eq!(dashboard.status(), StatusCode::OK);
    let html = dashboard.text().await.unwrap();
    for column in ["Todo", "In Progress", "Done", "Backlog"] {
        assert!(html.contains(column), "dashboard lists {}", column);
    }
}

#[tokio::test]
async fn test_task_lifecycle_through_pages() {
    let app = TestApp::spawn().await;
    let cookie = app.register("jane@example.com").await;
    let ids = app.category_ids(&cookie).await;
    let todo = ids[0].to_string();

    // Create
    let response = app
        .post_form(
            "/task/create",
            Some(&cookie),
            &[
                ("title", "Plan sprint"),
                ("description", "pick stories"),
                ("category", &todo),
            ],
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let tasks = app.api_get("/api/v1/tasks/get", &cookie).await;
    let task_id = tasks[0]["id"].as_i64().expect("task created");
    let html = app.get_page("/dashboard", &cookie).await.text().await.unwrap();
    assert!(html.contains("Plan sprint"));
    // First column moves left onto itself
    assert!(html.contains(&format!("/task/move?task_id={}&category_id={}", task_id, ids[0])));

    // Move right
    let response = app
        .get_page(
            &format!("/task/move?task_id={}&category_id={}", task_id, ids[1]),
            &cookie,
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let task = app
        .api_get(&format!("/api/v1/tasks/get?task_id={}", task_id), &cookie)
        .await;
    assert_eq!(task["category_id"], ids[1]);

    // Edit
    let form = app
        .get_page(&format!("/task/update?task_id={}", task_id), &cookie)
        .await
        .text()
        .await
        .unwrap();
    assert!(form.contains(r#"value="Plan sprint""#));

    let id = task_id.to_string();
    let response = app
        .post_form(
            "/task/update/process",
            Some(&cookie),
            &[("id", &id), ("title", "Plan sprint 2"), ("description", "")],
        )
        .await;
    assert_eq!(location(&response), "/dashboard");
    let task = app
        .api_get(&format!("/api/v1/tasks/get?task_id={}", task_id), &cookie)
        .await;
    assert_eq!(task["title"], "Plan sprint 2");

    // Delete
    let response = app
        .get_page(&format!("/task/delete?task_id={}", task_id), &cookie)
        .await;
    assert_eq!(location(&response), "/dashboard");
    assert_eq!(app.api_get("/api/v1/tasks/get", &cookie).await, serde_json::json!([]));
}

#[tokio::test]
async fn test_category_pages_add_and_delete() {
    let app = TestApp::spawn().await;
    let cookie = app.register("jane@example.com").await;

    let response = app
        .post_form("/category/create", Some(&cookie), &[("type", "Review")])
        .await;
    assert_eq!(location(&response), "/dashboard");

    let response = app
        .post_form("/category/create", Some(&cookie), &[("type", "")])
        .await;
    assert_eq!(location(&response), "/category/add");

    let ids = app.category_ids(&cookie).await;
    assert_eq!(ids.len(), 5);
    let review = ids[4];

    let response = app
        .get_page(&format!("/category/delete?category_id={}", review), &cookie)
        .await;
    assert_eq!(location(&response), "/dashboard");
    assert_eq!(app.category_ids(&cookie).await.len(), 4);
}

#[tokio::test]
async fn test_editing_someone_elses_task_is_not_found() {
    let app = TestApp::spawn().await;
    let owner = app.register("owner@example.com").await;
    let other = app.register("other@example.com").await;
    let todo = app.category_ids(&owner).await[0].to_string();

    app.post_form(
        "/task/create",
        Some(&owner),
        &[("title", "mine"), ("description", ""), ("category", &todo)],
    )
    .await;
    let task_id = app.api_get("/api/v1/tasks/get", &owner).await[0]["id"]
        .as_i64()
        .expect("task created");

    let response = app
        .get_page(&format!("/task/update?task_id={}", task_id), &other)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
