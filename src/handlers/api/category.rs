use super::{decode_json, required_id, QueryParams};
use crate::auth::middleware::AuthUser;
use crate::error::{AppError, Result};
use crate::models::{Category, CategoryData, CategoryIdResponse, CategoryRequest};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    Json,
};

const INVALID_REQUEST: &str = "invalid category request";

pub async fn get_categories(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Category>>> {
    let categories = state.category_service.get_categories(user.id).await?;
    Ok(Json(categories))
}

pub async fn dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<CategoryData>>> {
    let board = state
        .category_service
        .get_categories_with_tasks(user.id)
        .await?;
    Ok(Json(board))
}

pub async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    body: Bytes,
) -> Result<(StatusCode, Json<CategoryIdResponse>)> {
    let request: CategoryRequest = decode_json(&body, INVALID_REQUEST)?;
    if request.kind.trim().is_empty() {
        return Err(AppError::Validation(INVALID_REQUEST.to_string()));
    }

    let category = state
        .category_service
        .store_category(user.id, &request.kind)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CategoryIdResponse {
            category_id: category.id,
            message: "success create new category".to_string(),
        }),
    ))
}

pub async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<QueryParams>,
) -> Result<Json<CategoryIdResponse>> {
    let category_id = required_id(&params, "category_id")?;
    state
        .category_service
        .delete_category(category_id, user.id)
        .await?;

    Ok(Json(CategoryIdResponse {
        category_id,
        message: "success delete category".to_string(),
    }))
}
