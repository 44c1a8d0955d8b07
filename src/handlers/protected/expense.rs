use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::access::{Repository, SqlValue, Table};
use crate::database::models::expense::Expense;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

const COLUMNS: &[&str] = &[
    "expense_date",
    "expense_amount",
    "expense_description",
    "tag_id",
    "is_recurring",
    "recurring_frequency",
];

/// Create and update share this body. The owner is always the authenticated
/// caller, never a body field.
#[derive(Debug, Deserialize)]
pub struct ExpenseRequest {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub desc: String,
    pub tag_id: i32,
    /// Absent means a one-off expense.
    #[serde(default)]
    pub is_rec: bool,
    pub rec_freq: Option<String>,
}

impl ExpenseRequest {
    fn into_values(self) -> Vec<SqlValue> {
        vec![
            SqlValue::from(self.date),
            SqlValue::from(self.amount),
            SqlValue::from(self.desc),
            SqlValue::from(self.tag_id),
            SqlValue::from(self.is_rec),
            SqlValue::from(self.rec_freq),
        ]
    }
}

/// POST /expense/create
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<ExpenseRequest>,
) -> Result<Json<Expense>, ApiError> {
    let mut columns = vec!["user_id"];
    columns.extend_from_slice(COLUMNS);

    let mut values = vec![SqlValue::from(auth.user_id)];
    values.extend(body.into_values());

    let expense = Repository::<Expense>::new(Table::Expenses, state.pool.clone())
        .insert(&columns, values)
        .await?;

    Ok(Json(expense))
}

/// GET /expense/ - every expense owned by the caller. An empty result is a
/// 404, conflating "no data yet" with "not found".
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    let expenses = Repository::<Expense>::new(Table::Expenses, state.pool.clone())
        .find_by("user_id", SqlValue::from(auth.user_id))
        .await?;

    if expenses.is_empty() {
        return Err(ApiError::not_found("No expenses found"));
    }

    Ok(Json(expenses))
}

/// PUT /expense/update/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
    Json(body): Json<ExpenseRequest>,
) -> Result<Json<Expense>, ApiError> {
    let updated = Repository::<Expense>::new(Table::Expenses, state.pool.clone())
        .update_owned(
            COLUMNS,
            body.into_values(),
            "expense_id",
            SqlValue::from(id),
            "user_id",
            SqlValue::from(auth.user_id),
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Expense not found or not owned"))?;

    Ok(Json(updated))
}

/// DELETE /expense/delete/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let removed = Repository::<Expense>::new(Table::Expenses, state.pool.clone())
        .delete_owned(
            "expense_id",
            SqlValue::from(id),
            "user_id",
            SqlValue::from(auth.user_id),
        )
        .await?;

    if removed == 0 {
        return Err(ApiError::not_found("Expense not found or not owned"));
    }

    Ok(Json(json!({ "message": "Expense deleted successfully" })))
}
