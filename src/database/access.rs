//! Generic table-parameterized CRUD primitives shared by every resource
//! handler. Table and column names in identifier position originate only
//! from hard-coded call sites (the [`Table`] enum is the allow-list for
//! tables; column names are `&'static str` by contract); row values always
//! travel as bound parameters.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{FromRow, PgPool, Postgres};
use thiserror::Error;

/// Errors from the access layer.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("duplicate value for unique column")]
    Unique,

    #[error("row is still referenced by another table")]
    ForeignKey,

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db) = err {
            match db.kind() {
                sqlx::error::ErrorKind::UniqueViolation => return DatabaseError::Unique,
                sqlx::error::ErrorKind::ForeignKeyViolation => return DatabaseError::ForeignKey,
                _ => {}
            }
        }
        DatabaseError::Sqlx(err)
    }
}

/// The tables this layer may touch. Nothing user-supplied ever reaches
/// identifier position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Users,
    Expenses,
    Incomes,
    Tags,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Expenses => "expenses",
            Table::Incomes => "incomes",
            Table::Tags => "tags",
        }
    }
}

/// A bound statement parameter. Covers every column type in the schema;
/// `Null` is how optional columns (and COALESCE-kept updates) are expressed.
#[derive(Debug, Clone)]
pub enum SqlValue {
    Int(i64),
    Decimal(Decimal),
    Text(String),
    Date(NaiveDate),
    Bool(bool),
    Null,
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(v as i64)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<Decimal> for SqlValue {
    fn from(v: Decimal) -> Self {
        SqlValue::Decimal(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        SqlValue::Date(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => SqlValue::Null,
        }
    }
}

pub struct Repository<T> {
    table: Table,
    pool: PgPool,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Repository<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(table: Table, pool: PgPool) -> Self {
        Self {
            table,
            pool,
            _phantom: std::marker::PhantomData,
        }
    }

    pub async fn list_all(&self) -> Result<Vec<T>, DatabaseError> {
        let sql = format!("SELECT * FROM {}", self.table.as_str());
        Ok(sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await?)
    }

    pub async fn find_by(
        &self,
        column: &'static str,
        value: SqlValue,
    ) -> Result<Vec<T>, DatabaseError> {
        let sql = format!(
            "SELECT * FROM {} WHERE {} = $1",
            self.table.as_str(),
            column
        );
        let q = bind_value_as(sqlx::query_as::<_, T>(&sql), value);
        Ok(q.fetch_all(&self.pool).await?)
    }

    /// Returns the number of rows removed.
    pub async fn delete_by(
        &self,
        column: &'static str,
        value: SqlValue,
    ) -> Result<u64, DatabaseError> {
        let sql = format!("DELETE FROM {} WHERE {} = $1", self.table.as_str(), column);
        let done = bind_value(sqlx::query(&sql), value)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected())
    }

    pub async fn insert(
        &self,
        columns: &[&'static str],
        values: Vec<SqlValue>,
    ) -> Result<T, DatabaseError> {
        let sql = build_insert_sql(self.table, columns);
        let mut q = sqlx::query_as::<_, T>(&sql);
        for value in values {
            q = bind_value_as(q, value);
        }
        Ok(q.fetch_one(&self.pool).await?)
    }

    pub async fn update_by(
        &self,
        sets: &[&'static str],
        values: Vec<SqlValue>,
        key_column: &'static str,
        key: SqlValue,
    ) -> Result<Option<T>, DatabaseError> {
        let sql = build_update_sql(self.table, sets, false, &[key_column]);
        let mut q = sqlx::query_as::<_, T>(&sql);
        for value in values {
            q = bind_value_as(q, value);
        }
        q = bind_value_as(q, key);
        Ok(q.fetch_optional(&self.pool).await?)
    }

    /// Like [`Repository::update_by`], but a NULL-bound value keeps the
    /// column's current contents instead of overwriting it.
    pub async fn update_by_coalesce(
        &self,
        sets: &[&'static str],
        values: Vec<SqlValue>,
        key_column: &'static str,
        key: SqlValue,
    ) -> Result<Option<T>, DatabaseError> {
        let sql = build_update_sql(self.table, sets, true, &[key_column]);
        let mut q = sqlx::query_as::<_, T>(&sql);
        for value in values {
            q = bind_value_as(q, value);
        }
        q = bind_value_as(q, key);
        Ok(q.fetch_optional(&self.pool).await?)
    }

    /// Owner-scoped update: primary key and owner equality in one predicate.
    /// `None` means no row matched both, i.e. not found or not owned; this
    /// single statement is the sole authorization check, so there is no
    /// read-then-check window.
    pub async fn update_owned(
        &self,
        sets: &[&'static str],
        values: Vec<SqlValue>,
        id_column: &'static str,
        id: SqlValue,
        owner_column: &'static str,
        owner: SqlValue,
    ) -> Result<Option<T>, DatabaseError> {
        let sql = build_update_sql(self.table, sets, false, &[id_column, owner_column]);
        let mut q = sqlx::query_as::<_, T>(&sql);
        for value in values {
            q = bind_value_as(q, value);
        }
        q = bind_value_as(q, id);
        q = bind_value_as(q, owner);
        Ok(q.fetch_optional(&self.pool).await?)
    }

    /// Owner-scoped delete; zero rows removed means not found or not owned.
    pub async fn delete_owned(
        &self,
        id_column: &'static str,
        id: SqlValue,
        owner_column: &'static str,
        owner: SqlValue,
    ) -> Result<u64, DatabaseError> {
        let sql = build_delete_sql(self.table, &[id_column, owner_column]);
        let q = bind_value(bind_value(sqlx::query(&sql), id), owner);
        let done = q.execute(&self.pool).await?;
        Ok(done.rows_affected())
    }
}

fn build_insert_sql(table: Table, columns: &[&'static str]) -> String {
    let placeholders = (1..=columns.len())
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING *",
        table.as_str(),
        columns.join(", "),
        placeholders
    )
}

fn build_update_sql(
    table: Table,
    sets: &[&'static str],
    keep_missing: bool,
    keys: &[&'static str],
) -> String {
    let assignments = sets
        .iter()
        .enumerate()
        .map(|(i, col)| {
            if keep_missing {
                format!("{col} = COALESCE(${}, {col})", i + 1)
            } else {
                format!("{col} = ${}", i + 1)
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    let predicate = keys
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{col} = ${}", sets.len() + i + 1))
        .collect::<Vec<_>>()
        .join(" AND ");

    format!(
        "UPDATE {} SET {} WHERE {} RETURNING *",
        table.as_str(),
        assignments,
        predicate
    )
}

fn build_delete_sql(table: Table, keys: &[&'static str]) -> String {
    let predicate = keys
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{col} = ${}", i + 1))
        .collect::<Vec<_>>()
        .join(" AND ");
    format!("DELETE FROM {} WHERE {}", table.as_str(), predicate)
}

fn bind_value(
    q: sqlx::query::Query<'_, Postgres, PgArguments>,
    value: SqlValue,
) -> sqlx::query::Query<'_, Postgres, PgArguments> {
    match value {
        SqlValue::Int(v) => q.bind(v),
        SqlValue::Decimal(v) => q.bind(v),
        SqlValue::Text(v) => q.bind(v),
        SqlValue::Date(v) => q.bind(v),
        SqlValue::Bool(v) => q.bind(v),
        SqlValue::Null => q.bind(Option::<String>::None),
    }
}

fn bind_value_as<'q, T>(
    q: sqlx::query::QueryAs<'q, Postgres, T, PgArguments>,
    value: SqlValue,
) -> sqlx::query::QueryAs<'q, Postgres, T, PgArguments> {
    match value {
        SqlValue::Int(v) => q.bind(v),
        SqlValue::Decimal(v) => q.bind(v),
        SqlValue::Text(v) => q.bind(v),
        SqlValue::Date(v) => q.bind(v),
        SqlValue::Bool(v) => q.bind(v),
        SqlValue::Null => q.bind(Option::<String>::None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_are_fixed() {
        assert_eq!(Table::Users.as_str(), "users");
        assert_eq!(Table::Expenses.as_str(), "expenses");
        assert_eq!(Table::Incomes.as_str(), "incomes");
        assert_eq!(Table::Tags.as_str(), "tags");
    }

    #[test]
    fn insert_sql_uses_positional_placeholders() {
        let sql = build_insert_sql(Table::Tags, &["tag_name"]);
        assert_eq!(sql, "INSERT INTO tags (tag_name) VALUES ($1) RETURNING *");

        let sql = build_insert_sql(Table::Incomes, &["user_id", "income_date", "income_amount"]);
        assert_eq!(
            sql,
            "INSERT INTO incomes (user_id, income_date, income_amount) VALUES ($1, $2, $3) RETURNING *"
        );
    }

    #[test]
    fn owner_scoped_update_predicates_on_id_and_owner() {
        let sql = build_update_sql(
            Table::Expenses,
            &["expense_date", "expense_amount"],
            false,
            &["expense_id", "user_id"],
        );
        assert_eq!(
            sql,
            "UPDATE expenses SET expense_date = $1, expense_amount = $2 \
             WHERE expense_id = $3 AND user_id = $4 RETURNING *"
        );
    }

    #[test]
    fn coalesce_update_keeps_columns_for_null_binds() {
        let sql = build_update_sql(Table::Users, &["username", "password"], true, &["user_id"]);
        assert_eq!(
            sql,
            "UPDATE users SET username = COALESCE($1, username), \
             password = COALESCE($2, password) WHERE user_id = $3 RETURNING *"
        );
    }

    #[test]
    fn owner_scoped_delete_predicates_on_id_and_owner() {
        let sql = build_delete_sql(Table::Incomes, &["income_id", "user_id"]);
        assert_eq!(sql, "DELETE FROM incomes WHERE income_id = $1 AND user_id = $2");
    }

    #[test]
    fn optional_values_bind_as_null() {
        assert!(matches!(SqlValue::from(Option::<String>::None), SqlValue::Null));
        assert!(matches!(
            SqlValue::from(Some("weekly".to_string())),
            SqlValue::Text(_)
        ));
    }
}
