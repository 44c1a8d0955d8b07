use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub expense_id: i32,
    pub user_id: i32,
    pub expense_date: NaiveDate,
    pub expense_amount: Decimal,
    pub expense_description: String,
    pub tag_id: i32,
    pub is_recurring: bool,
    pub recurring_frequency: Option<String>,
}
