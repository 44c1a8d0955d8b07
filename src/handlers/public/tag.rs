use axum::{
    extract::{Path, State},
    Json,
};

use crate::database::access::{Repository, SqlValue, Table};
use crate::database::models::tag::Tag;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /tag/ - list every tag. Tags are shared across users, so no auth.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Tag>>, ApiError> {
    let tags = Repository::<Tag>::new(Table::Tags, state.pool.clone())
        .list_all()
        .await?;

    if tags.is_empty() {
        return Err(ApiError::not_found("No tags found"));
    }

    Ok(Json(tags))
}

/// GET /tag/:id - fetch one tag.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Tag>, ApiError> {
    let tag = Repository::<Tag>::new(Table::Tags, state.pool.clone())
        .find_by("tag_id", SqlValue::from(id))
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::not_found("Tag not found"))?;

    Ok(Json(tag))
}
