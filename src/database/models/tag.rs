use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Category tag. Global rows shared by every user's expenses and incomes.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub tag_id: i32,
    pub tag_name: String,
}
