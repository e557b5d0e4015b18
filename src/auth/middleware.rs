use crate::config::session::USER_ID_COOKIE;
use crate::error::AppError;
use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{CookieJar, SignedCookieJar};

/// The logged-in user, inserted by [`require_user`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i64,
    /// Raw signed cookie value, forwarded when the web pages call the API.
    pub session: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Resolve the session cookie into an [`AuthUser`].
///
/// A cookie whose signature does not verify is treated as absent.
pub fn session_user(signed: &SignedCookieJar, raw: &CookieJar) -> Option<AuthUser> {
    let id = signed
        .get(USER_ID_COOKIE)
        .and_then(|cookie| cookie.value().parse::<i64>().ok())?;
    let session = raw.get(USER_ID_COOKIE)?.value().to_string();

    Some(AuthUser { id, session })
}

pub async fn require_user(
    signed: SignedCookieJar,
    raw: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match session_user(&signed, &raw) {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None if wants_json(request.headers()) => AppError::Unauthorized.into_response(),
        None => Redirect::to("/login").into_response(),
    }
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("application/json"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_wants_json() {
        let mut headers = HeaderMap::new();
        assert!(!wants_json(&headers));

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json; charset=utf-8"),
        );
        assert!(wants_json(&headers));

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        assert!(!wants_json(&headers));
    }
}
