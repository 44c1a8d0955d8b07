use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::access::{Repository, SqlValue, Table};
use crate::database::models::tag::Tag;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TagRequest {
    pub tag_name: String,
}

/// POST /tag/create - tags are global, so creation only requires a session,
/// not ownership.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<TagRequest>,
) -> Result<Json<Tag>, ApiError> {
    let tag = Repository::<Tag>::new(Table::Tags, state.pool.clone())
        .insert(&["tag_name"], vec![SqlValue::from(body.tag_name)])
        .await?;

    Ok(Json(tag))
}

/// PUT /tag/update/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<TagRequest>,
) -> Result<Json<Tag>, ApiError> {
    let updated = Repository::<Tag>::new(Table::Tags, state.pool.clone())
        .update_by(
            &["tag_name"],
            vec![SqlValue::from(body.tag_name)],
            "tag_id",
            SqlValue::from(id),
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Tag not found"))?;

    Ok(Json(updated))
}

/// DELETE /tag/delete/:id - deleting a tag still referenced by an expense or
/// income fails on the foreign key and surfaces as a generic server error.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    Repository::<Tag>::new(Table::Tags, state.pool.clone())
        .delete_by("tag_id", SqlValue::from(id))
        .await?;

    Ok(Json(json!({ "message": "Tag deleted successfully" })))
}
