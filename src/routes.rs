use crate::{auth, handlers, middleware::restrict_method, AppState};
use axum::{
    handler::Handler,
    http::Method,
    middleware,
    routing::{any, get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Collects `/api/v1` routes, each pinned to one verb.
struct ApiRoutes {
    router: Router<AppState>,
    state: AppState,
}

impl ApiRoutes {
    fn new(state: AppState) -> Self {
        Self {
            router: Router::new(),
            state,
        }
    }

    fn open<H, T>(mut self, method: Method, path: &str, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        tracing::info!("[{}]: /api/v1{}", method, path);
        self.router = self.router.route(
            path,
            any(handler).layer(middleware::from_fn_with_state(method, restrict_method)),
        );
        self
    }

    // Method check wraps the session check
    fn protected<H, T>(mut self, method: Method, path: &str, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        tracing::info!("[{}]: /api/v1{}", method, path);
        self.router = self.router.route(
            path,
            any(handler)
                .layer(middleware::from_fn_with_state(
                    self.state.clone(),
                    auth::require_user,
                ))
                .layer(middleware::from_fn_with_state(method, restrict_method)),
        );
        self
    }

    fn into_router(self) -> Router<AppState> {
        self.router
    }
}

fn api_routes(state: &AppState) -> Router<AppState> {
    use handlers::api::{category, task, user};

    ApiRoutes::new(state.clone())
        .open(Method::POST, "/users/login", user::login)
        .open(Method::POST, "/users/register", user::register)
        .open(Method::POST, "/users/logout", user::logout)
        .protected(Method::GET, "/users/get", user::get_user)
        // Unauthenticated, as it has always been
        .open(Method::DELETE, "/users/delete", user::delete_user)
        .protected(Method::GET, "/tasks/get", task::get_tasks)
        .protected(Method::POST, "/tasks/create", task::create_task)
        .protected(Method::PUT, "/tasks/update", task::update_task)
        .protected(
            Method::PUT,
            "/tasks/update/category",
            task::update_task_category,
        )
        .protected(Method::DELETE, "/tasks/delete", task::delete_task)
        .protected(Method::GET, "/categories/get", category::get_categories)
        .protected(Method::GET, "/categories/dashboard", category::dashboard)
        .protected(Method::POST, "/categories/create", category::create_category)
        .protected(Method::DELETE, "/categories/delete", category::delete_category)
        .into_router()
}

fn page_routes(state: &AppState) -> Router<AppState> {
    use handlers::web::{dashboard, home, modify};

    let protected_routes = Router::new()
        .route("/dashboard", get(dashboard::dashboard))
        .route("/category/add", get(modify::add_category_page))
        .route("/category/create", post(modify::create_category))
        .route("/category/delete", get(modify::delete_category))
        .route("/task/add", get(modify::add_task_page))
        .route("/task/create", post(modify::create_task))
        .route("/task/update", get(modify::update_task_page))
        .route("/task/update/process", post(modify::update_task_process))
        .route("/task/move", get(modify::move_task))
        .route("/task/delete", get(modify::delete_task))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_user,
        ));

    Router::new()
        .route("/", get(home::index))
        .route("/login", get(auth::handlers::login_page))
        .route("/login/process", post(auth::handlers::login_handler))
        .route("/register", get(auth::handlers::register_page))
        .route("/register/process", post(auth::handlers::register_handler))
        .route("/logout", get(auth::handlers::logout_handler))
        .merge(protected_routes)
}

/// Full application router: JSON API, pages and static assets.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes(&state))
        .merge(page_routes(&state))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
