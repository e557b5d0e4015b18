use super::{page_error, PageResult};
use crate::auth::middleware::AuthUser;
use crate::AppState;
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::Redirect,
};
use serde::Deserialize;

#[derive(Template, WebTemplate)]
#[template(path = "category/add.html")]
pub struct AddCategoryTemplate;

#[derive(Template, WebTemplate)]
#[template(path = "task/add.html")]
pub struct AddTaskTemplate {
    pub category_id: i64,
}

#[derive(Template, WebTemplate)]
#[template(path = "task/update.html")]
pub struct UpdateTaskTemplate {
    pub id: i64,
    pub title: String,
    pub description: String,
}

#[derive(Deserialize)]
pub struct CategoryForm {
    #[serde(rename = "type", default)]
    kind: String,
}

#[derive(Deserialize)]
pub struct CategoryQuery {
    category_id: i64,
}

#[derive(Deserialize)]
pub struct AddTaskQuery {
    category: i64,
}

#[derive(Deserialize)]
pub struct TaskForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    category: i64,
}

#[derive(Deserialize)]
pub struct TaskQuery {
    task_id: i64,
}

#[derive(Deserialize)]
pub struct UpdateTaskForm {
    id: i64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

#[derive(Deserialize)]
pub struct MoveTaskQuery {
    task_id: i64,
    category_id: i64,
}

pub async fn add_category_page() -> AddCategoryTemplate {
    AddCategoryTemplate
}

pub async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    Form(form): Form<CategoryForm>,
) -> PageResult<Redirect> {
    let status = state
        .api_client
        .add_category(&user.session, &form.kind)
        .await
        .map_err(page_error)?;

    if status == StatusCode::CREATED {
        Ok(Redirect::to("/dashboard"))
    } else {
        Ok(Redirect::to("/category/add"))
    }
}

pub async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<CategoryQuery>,
) -> PageResult<Redirect> {
    state
        .api_client
        .delete_category(&user.session, query.category_id)
        .await
        .map_err(page_error)?;

    Ok(Redirect::to("/dashboard"))
}

pub async fn add_task_page(Query(query): Query<AddTaskQuery>) -> AddTaskTemplate {
    AddTaskTemplate {
        category_id: query.category,
    }
}

pub async fn create_task(
    State(state): State<AppState>,
    user: AuthUser,
    Form(form): Form<TaskForm>,
) -> PageResult<Redirect> {
    let status = state
        .api_client
        .create_task(&user.session, &form.title, &form.description, form.category)
        .await
        .map_err(page_error)?;

    if status == StatusCode::CREATED {
        Ok(Redirect::to("/dashboard"))
    } else {
        Ok(Redirect::to(&format!("/task/add?category={}", form.category)))
    }
}

pub async fn update_task_page(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<TaskQuery>,
) -> PageResult<UpdateTaskTemplate> {
    let task = state
        .api_client
        .get_task(&user.session, query.task_id)
        .await
        .map_err(page_error)?;

    Ok(UpdateTaskTemplate {
        id: task.id,
        title: task.title,
        description: task.description,
    })
}

pub async fn update_task_process(
    State(state): State<AppState>,
    user: AuthUser,
    Form(form): Form<UpdateTaskForm>,
) -> PageResult<Redirect> {
    let status = state
        .api_client
        .update_task(&user.session, form.id, &form.title, &form.description)
        .await
        .map_err(page_error)?;

    if status.is_success() {
        Ok(Redirect::to("/dashboard"))
    } else {
        Ok(Redirect::to(&format!("/task/update?task_id={}", form.id)))
    }
}

pub async fn move_task(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<MoveTaskQuery>,
) -> PageResult<Redirect> {
    let status = state
        .api_client
        .update_task_category(&user.session, query.task_id, query.category_id)
        .await
        .map_err(page_error)?;

    if !status.is_success() {
        tracing::warn!("moving task {} answered {}", query.task_id, status);
    }
    Ok(Redirect::to("/dashboard"))
}

pub async fn delete_task(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<TaskQuery>,
) -> PageResult<Redirect> {
    state
        .api_client
        .delete_task(&user.session, query.task_id)
        .await
        .map_err(page_error)?;

    Ok(Redirect::to("/dashboard"))
}
