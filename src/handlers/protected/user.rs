use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::password;
use crate::database::access::{Repository, SqlValue, Table};
use crate::database::models::user::{User, UserResponse};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// GET /user/ - profile of the authenticated user.
pub async fn get_self(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = Repository::<User>::new(Table::Users, state.pool.clone())
        .find_by("user_id", SqlValue::from(auth.user_id))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(UserResponse::from(user)))
}

/// PUT /user/update - change display name and/or password. Omitted fields
/// keep their current values via COALESCE in a single statement.
pub async fn update_self(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let hashed = match body.password.as_deref() {
        Some(plaintext) => Some(password::hash(plaintext)?),
        None => None,
    };

    let updated = Repository::<User>::new(Table::Users, state.pool.clone())
        .update_by_coalesce(
            &["username", "password"],
            vec![SqlValue::from(body.username), SqlValue::from(hashed)],
            "user_id",
            SqlValue::from(auth.user_id),
        )
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(UserResponse::from(updated)))
}

/// DELETE /user/delete - remove the authenticated user's account. Owned
/// expenses and incomes go with it via the cascading foreign key.
pub async fn delete_self(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    Repository::<User>::new(Table::Users, state.pool.clone())
        .delete_by("user_id", SqlValue::from(auth.user_id))
        .await?;

    Ok(Json(json!({ "message": "User deleted successfully" })))
}
