use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::access::{Repository, SqlValue, Table};
use crate::database::models::income::Income;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

const COLUMNS: &[&str] = &["income_date", "income_amount", "income_description", "tag_id"];

#[derive(Debug, Deserialize)]
pub struct IncomeRequest {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub desc: String,
    pub tag_id: i32,
}

impl IncomeRequest {
    fn into_values(self) -> Vec<SqlValue> {
        vec![
            SqlValue::from(self.date),
            SqlValue::from(self.amount),
            SqlValue::from(self.desc),
            SqlValue::from(self.tag_id),
        ]
    }
}

/// POST /income/create
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<IncomeRequest>,
) -> Result<Json<Income>, ApiError> {
    let mut columns = vec!["user_id"];
    columns.extend_from_slice(COLUMNS);

    let mut values = vec![SqlValue::from(auth.user_id)];
    values.extend(body.into_values());

    let income = Repository::<Income>::new(Table::Incomes, state.pool.clone())
        .insert(&columns, values)
        .await?;

    Ok(Json(income))
}

/// GET /income/ - every income owned by the caller; empty is a 404.
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<Income>>, ApiError> {
    let incomes = Repository::<Income>::new(Table::Incomes, state.pool.clone())
        .find_by("user_id", SqlValue::from(auth.user_id))
        .await?;

    if incomes.is_empty() {
        return Err(ApiError::not_found("No incomes found"));
    }

    Ok(Json(incomes))
}

/// PUT /income/update/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
    Json(body): Json<IncomeRequest>,
) -> Result<Json<Income>, ApiError> {
    let updated = Repository::<Income>::new(Table::Incomes, state.pool.clone())
        .update_owned(
            COLUMNS,
            body.into_values(),
            "income_id",
            SqlValue::from(id),
            "user_id",
            SqlValue::from(auth.user_id),
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Income not found or not owned"))?;

    Ok(Json(updated))
}

/// DELETE /income/delete/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let removed = Repository::<Income>::new(Table::Incomes, state.pool.clone())
        .delete_owned(
            "income_id",
            SqlValue::from(id),
            "user_id",
            SqlValue::from(auth.user_id),
        )
        .await?;

    if removed == 0 {
        return Err(ApiError::not_found("Income not found or not owned"));
    }

    Ok(Json(json!({ "message": "Income deleted successfully" })))
}
