use super::{decode_json, optional_id, required_id, QueryParams};
use crate::auth::middleware::AuthUser;
use crate::error::{AppError, Result};
use crate::models::{MessageResponse, User, UserIdResponse, UserLogin, UserRegister};
use crate::services::{LoginRequest, RegisterRequest, UserServiceError};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::{CookieJar, SignedCookieJar};

pub async fn register(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<UserIdResponse>)> {
    let form: UserRegister = decode_json(&body, "invalid decode json")?;
    if form.is_empty() {
        return Err(AppError::Validation("register data is empty".to_string()));
    }

    let user = state
        .user_service
        .register(RegisterRequest {
            fullname: form.fullname,
            email: form.email,
            password: form.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserIdResponse {
            user_id: user.id,
            message: "register success".to_string(),
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    body: Bytes,
) -> Result<(SignedCookieJar, Json<UserIdResponse>)> {
    let form: UserLogin = decode_json(&body, "invalid decode json")?;
    if form.is_empty() {
        return Err(AppError::Validation(
            "email or password is empty".to_string(),
        ));
    }

    // Unknown email and wrong password look the same to the caller
    let user_id = state
        .user_service
        .login(LoginRequest {
            email: form.email,
            password: form.password,
        })
        .await
        .map_err(|e| match e {
            UserServiceError::UserNotFound => AppError::InvalidCredential,
            other => other.into(),
        })?;

    let cookie = state
        .cookie_config
        .session_cookie(user_id, state.cookie_config.api_max_age);

    Ok((
        jar.add(cookie),
        Json(UserIdResponse {
            user_id,
            message: "login success".to_string(),
        }),
    ))
}

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    (
        jar.add(state.cookie_config.removal_cookie()),
        Json(MessageResponse::new("logout success")),
    )
}

/// `?user_id=` falls back to the session user when absent.
pub async fn get_user(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<QueryParams>,
) -> Result<Json<User>> {
    let user_id = optional_id(&params, "user_id")?.unwrap_or(user.id);
    let found = state.user_service.get_user_by_id(user_id).await?;

    Ok(Json(found))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<MessageResponse>> {
    let user_id = required_id(&params, "user_id")?;
    state.user_service.delete_user(user_id).await?;

    Ok(Json(MessageResponse::new("delete success")))
}
