//! MySQL implementation of the record store.

use crate::config::RegisteredTable;
use crate::error::AppError;
use crate::schema::ColumnDescriptor;
use crate::sql::{self, bind_all, QueryBuf};
use crate::store::RecordStore;
use crate::value::{FieldValue, Record};
use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlRow};
use sqlx::{Column, Row};

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlStore { pool }
    }

    async fn query_many(&self, q: &QueryBuf) -> Result<Vec<MySqlRow>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        Ok(bind_all(&q.sql, &q.params).fetch_all(&self.pool).await?)
    }

    async fn execute(&self, q: &QueryBuf) -> Result<sqlx::mysql::MySqlQueryResult, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        Ok(bind_all(&q.sql, &q.params).execute(&self.pool).await?)
    }
}

#[async_trait]
impl RecordStore for MySqlStore {
    async fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>, AppError> {
        let rows = self.query_many(&sql::describe_columns(table)).await?;
        rows.iter().map(row_to_column).collect()
    }

    async fn fetch_page(&self, table: &RegisteredTable, limit: u64, offset: u64) -> Result<Vec<Record>, AppError> {
        let rows = self.query_many(&sql::select_page(table, limit, offset)).await?;
        Ok(rows.iter().map(row_to_record).collect())
    }

    async fn count(&self, table: &RegisteredTable) -> Result<u64, AppError> {
        let q = sql::count(table);
        tracing::debug!(sql = %q.sql, "query");
        let total = sqlx::query_scalar::<_, i64>(&q.sql).fetch_one(&self.pool).await?;
        Ok(total.max(0) as u64)
    }

    async fn fetch_by_key(&self, table: &RegisteredTable, key: &FieldValue) -> Result<Option<Record>, AppError> {
        let rows = self.query_many(&sql::select_by_key(table, key)).await?;
        Ok(rows.first().map(row_to_record))
    }

    async fn insert(&self, table: &RegisteredTable, fields: &Record) -> Result<Option<FieldValue>, AppError> {
        let result = self.execute(&sql::insert(table, fields)).await?;
        let id = result.last_insert_id();
        Ok((id > 0).then(|| FieldValue::Int(id as i64)))
    }

    async fn update(&self, table: &RegisteredTable, key: &FieldValue, fields: &Record) -> Result<u64, AppError> {
        Ok(self.execute(&sql::update(table, key, fields)).await?.rows_affected())
    }

    async fn delete(&self, table: &RegisteredTable, key: &FieldValue) -> Result<u64, AppError> {
        Ok(self.execute(&sql::delete(table, key)).await?.rows_affected())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn row_to_column(row: &MySqlRow) -> Result<ColumnDescriptor, AppError> {
    let name: String = row.try_get("name")?;
    let declared_type: String = row.try_get("declared_type")?;
    let is_nullable: String = row.try_get("is_nullable")?;
    let default_value: Option<String> = row.try_get("default_value")?;
    let column_key: Option<String> = row.try_get("column_key")?;
    let extra: Option<String> = row.try_get("extra")?;
    Ok(ColumnDescriptor {
        name,
        declared_type,
        nullable: is_nullable.eq_ignore_ascii_case("YES"),
        default_value,
        is_auto_generated: extra
            .map(|e| e.to_lowercase().contains("auto_increment"))
            .unwrap_or(false),
        is_primary_key: column_key.as_deref() == Some("PRI"),
    })
}

fn row_to_record(row: &MySqlRow) -> Record {
    row.columns()
        .iter()
        .map(|col| {
            let name = col.name();
            (name.to_string(), cell_to_value(row, name))
        })
        .collect()
}

fn cell_to_value(row: &MySqlRow, name: &str) -> FieldValue {
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return FieldValue::Int(n);
    }
    if let Ok(Some(n)) = row.try_get::<Option<u64>, _>(name) {
        return i64::try_from(n)
            .map(FieldValue::Int)
            .unwrap_or_else(|_| FieldValue::Text(n.to_string()));
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        return FieldValue::Float(n);
    }
    if let Ok(Some(n)) = row.try_get::<Option<f32>, _>(name) {
        return FieldValue::Float(n as f64);
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return FieldValue::Bool(b);
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDateTime>, _>(name) {
        return FieldValue::Text(d.format("%Y-%m-%dT%H:%M:%S").to_string());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDate>, _>(name) {
        return FieldValue::Text(d.format("%Y-%m-%d").to_string());
    }
    if let Ok(Some(t)) = row.try_get::<Option<chrono::NaiveTime>, _>(name) {
        return FieldValue::Text(t.format("%H:%M:%S").to_string());
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return FieldValue::Text(s);
    }
    // DECIMAL and other text-encoded types arrive as their exact decimal text.
    if let Ok(Some(s)) = row.try_get_unchecked::<Option<String>, _>(name) {
        return FieldValue::Text(s);
    }
    FieldValue::Null
}
