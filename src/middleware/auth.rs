use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::cookie::AUTH_COOKIE;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller identity, attached to the request by [`require_auth`].
/// Handlers resolve the acting user from this and never from the body.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser {
    pub user_id: i32,
}

/// Cookie-based authentication middleware. A missing cookie is a 401; a
/// token that fails verification is a 403. Expired and tampered tokens are
/// deliberately indistinguishable at the HTTP surface. Touches no storage.
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let cookie = jar
        .get(AUTH_COOKIE)
        .ok_or_else(|| ApiError::unauthorized("Missing authentication cookie"))?;

    let user_id = state
        .tokens
        .verify(cookie.value())
        .map_err(|_| ApiError::forbidden("Invalid or expired session"))?;

    request.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(request).await)
}
