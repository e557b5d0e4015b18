use super::{decode_json, optional_id, required_id, QueryParams};
use crate::auth::middleware::AuthUser;
use crate::error::{AppError, Result};
use crate::models::{NewTask, TaskCategoryRequest, TaskIdResponse, TaskRequest, TaskUpdate};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

const INVALID_REQUEST: &str = "invalid task request";

fn invalid_request() -> AppError {
    AppError::Validation(INVALID_REQUEST.to_string())
}

/// `?task_id=` answers one task, `?category_id=` that column's tasks, and
/// no parameter every task of the session user.
pub async fn get_tasks(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<QueryParams>,
) -> Result<Response> {
    if let Some(task_id) = optional_id(&params, "task_id")? {
        let task = state.task_service.get_task_by_id(task_id, user.id).await?;
        return Ok(Json(task).into_response());
    }

    let tasks = match optional_id(&params, "category_id")? {
        Some(category_id) => {
            state
                .task_service
                .get_tasks_by_category(category_id, user.id)
                .await?
        }
        None => state.task_service.get_tasks(user.id).await?,
    };

    Ok(Json(tasks).into_response())
}

pub async fn create_task(
    State(state): State<AppState>,
    user: AuthUser,
    body: Bytes,
) -> Result<(StatusCode, Json<TaskIdResponse>)> {
    let request: TaskRequest = decode_json(&body, INVALID_REQUEST)?;
    if request.title.trim().is_empty() || request.category_id <= 0 {
        return Err(invalid_request());
    }

    let task = state
        .task_service
        .store_task(NewTask {
            title: request.title,
            description: request.description,
            category_id: request.category_id,
            user_id: user.id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TaskIdResponse {
            task_id: task.id,
            message: "success create new task".to_string(),
        }),
    ))
}

pub async fn update_task(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<QueryParams>,
    body: Bytes,
) -> Result<Json<TaskIdResponse>> {
    let task_id = required_id(&params, "task_id")?;
    let request: TaskRequest = decode_json(&body, INVALID_REQUEST)?;
    if request.title.trim().is_empty() {
        return Err(invalid_request());
    }

    state
        .task_service
        .update_task(TaskUpdate {
            id: task_id,
            user_id: user.id,
            title: Some(request.title),
            description: Some(request.description),
            category_id: (request.category_id > 0).then_some(request.category_id),
        })
        .await?;

    Ok(Json(TaskIdResponse {
        task_id,
        message: "success update task".to_string(),
    }))
}

pub async fn update_task_category(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<QueryParams>,
    body: Bytes,
) -> Result<Json<TaskIdResponse>> {
    let task_id = required_id(&params, "task_id")?;
    let request: TaskCategoryRequest = decode_json(&body, INVALID_REQUEST)?;
    if request.category_id <= 0 {
        return Err(invalid_request());
    }

    state
        .task_service
        .update_task(TaskUpdate {
            id: task_id,
            user_id: user.id,
            category_id: Some(request.category_id),
            ..Default::default()
        })
        .await?;

    Ok(Json(TaskIdResponse {
        task_id,
        message: "success update task category".to_string(),
    }))
}

pub async fn delete_task(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<QueryParams>,
) -> Result<Json<TaskIdResponse>> {
    let task_id = required_id(&params, "task_id")?;
    state.task_service.delete_task(task_id, user.id).await?;

    Ok(Json(TaskIdResponse {
        task_id,
        message: "success delete task".to_string(),
    }))
}
