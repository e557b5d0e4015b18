use crate::error::AppError;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Let only `allowed` through; every other verb gets a JSON 405.
///
/// Layered on each API route with
/// `middleware::from_fn_with_state(Method::GET, restrict_method)`. Sits
/// outside the session check, so a wrong verb is rejected before the
/// cookie is looked at.
pub async fn restrict_method(
    State(allowed): State<Method>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != allowed {
        tracing::debug!(
            "{} {} rejected, expected {}",
            request.method(),
            request.uri().path(),
            allowed
        );
        return AppError::MethodNotAllowed.into_response();
    }

    let mut response = next.run(request).await;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}
