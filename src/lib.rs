pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

// Make test_utils available for both unit tests and integration tests
pub mod test_utils;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use client::ApiClient;
use config::session::CookieConfig;
use repositories::{SqliteCategoryRepository, SqliteTaskRepository, SqliteUserRepository};
use services::{CategoryService, TaskService, UserService};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub category_service: Arc<CategoryService>,
    pub task_service: Arc<TaskService>,
    pub api_client: Arc<ApiClient>,
    pub cookie_config: CookieConfig,
    pub cookie_key: Key,
}

impl AppState {
    /// Wire repositories and services over one pool.
    pub fn new(
        pool: sqlx::SqlitePool,
        base_url: &str,
        cookie_config: CookieConfig,
        cookie_key: Key,
    ) -> Result<Self, client::ClientError> {
        let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
        let category_repository = Arc::new(SqliteCategoryRepository::new(pool.clone()));
        let task_repository = Arc::new(SqliteTaskRepository::new(pool.clone()));

        let user_service = Arc::new(UserService::new(
            user_repository,
            category_repository.clone(),
        ));
        let category_service = Arc::new(CategoryService::new(
            category_repository.clone(),
            task_repository.clone(),
        ));
        let task_service = Arc::new(TaskService::new(task_repository, category_repository));

        Ok(AppState {
            user_service,
            category_service,
            task_service,
            api_client: Arc::new(ApiClient::new(base_url)?),
            cookie_config,
            cookie_key,
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
