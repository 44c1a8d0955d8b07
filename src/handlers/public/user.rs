use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::auth::{cookie, password};
use crate::database::access::{DatabaseError, Repository, SqlValue, Table};
use crate::database::models::user::{User, UserResponse};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /user/create - register a new account.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let repo = Repository::<User>::new(Table::Users, state.pool.clone());

    let existing = repo
        .find_by("email", SqlValue::from(body.email.as_str()))
        .await?;
    if !existing.is_empty() {
        return Err(ApiError::conflict("User already exists"));
    }

    let hashed = password::hash(&body.password)?;

    // The pre-check above races with concurrent registrations; the unique
    // constraint on email is the authoritative check.
    let created = repo
        .insert(
            &["username", "password", "email"],
            vec![
                SqlValue::from(body.username),
                SqlValue::from(hashed),
                SqlValue::from(body.email),
            ],
        )
        .await
        .map_err(|err| match err {
            DatabaseError::Unique => ApiError::conflict("User already exists"),
            other => other.into(),
        })?;

    Ok(Json(UserResponse::from(created)))
}

/// POST /user/login - verify credentials and set the session cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<UserResponse>), ApiError> {
    let repo = Repository::<User>::new(Table::Users, state.pool.clone());

    // Unknown email and wrong password produce the same response.
    let user = repo
        .find_by("email", SqlValue::from(body.email))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::bad_request("Invalid email or password"))?;

    if !password::verify(&body.password, &user.password)? {
        return Err(ApiError::bad_request("Invalid email or password"));
    }

    let token = state.tokens.issue(user.user_id)?;
    let jar = jar.add(cookie::session_cookie(token));

    Ok((jar, Json(UserResponse::from(user))))
}
