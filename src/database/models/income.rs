use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Income {
    pub income_id: i32,
    pub user_id: i32,
    pub income_date: NaiveDate,
    pub income_amount: Decimal,
    pub income_description: String,
    pub tag_id: i32,
}
