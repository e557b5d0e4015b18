use crate::handlers::web::{page_error, PageResult};
use crate::AppState;
use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::Redirect,
};
use axum_extra::extract::cookie::{CookieJar, SignedCookieJar};
use serde::Deserialize;

#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate;

#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate;

#[derive(Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    fullname: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

pub async fn register_page() -> RegisterTemplate {
    RegisterTemplate
}

pub async fn register_handler(
    State(app_state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<RegisterForm>,
) -> PageResult<(SignedCookieJar, Redirect)> {
    let outcome = app_state
        .api_client
        .register(&form.fullname, &form.email, &form.password)
        .await
        .map_err(page_error)?;

    match outcome.user_id {
        Some(user_id) if outcome.status == StatusCode::CREATED => {
            let cookie = app_state
                .cookie_config
                .session_cookie(user_id, app_state.cookie_config.web_max_age);
            Ok((jar.add(cookie), Redirect::to("/dashboard")))
        }
        _ => Ok((jar, Redirect::to("/register"))),
    }
}

pub async fn login_page() -> LoginTemplate {
    LoginTemplate
}

pub async fn login_handler(
    State(app_state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> PageResult<(SignedCookieJar, Redirect)> {
    let outcome = app_state
        .api_client
        .login(&form.email, &form.password)
        .await
        .map_err(page_error)?;

    match outcome.user_id {
        Some(user_id) if outcome.status == StatusCode::OK => {
            let cookie = app_state
                .cookie_config
                .session_cookie(user_id, app_state.cookie_config.web_max_age);
            Ok((jar.add(cookie), Redirect::to("/dashboard")))
        }
        _ => Ok((jar, Redirect::to("/login"))),
    }
}

pub async fn logout_handler(
    State(app_state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    (
        jar.add(app_state.cookie_config.removal_cookie()),
        Redirect::to("/login"),
    )
}
