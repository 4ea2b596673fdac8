//! Backing-store access. Every statement is a direct pass-through; no transactions span calls.

mod mysql;
#[cfg(test)]
pub(crate) mod memory;

pub use mysql::MySqlStore;

use crate::config::RegisteredTable;
use crate::error::AppError;
use crate::schema::ColumnDescriptor;
use crate::value::{FieldValue, Record};
use async_trait::async_trait;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Catalog columns of `table` in declaration order. Empty when the table does not exist.
    async fn columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>, AppError>;

    async fn fetch_page(&self, table: &RegisteredTable, limit: u64, offset: u64) -> Result<Vec<Record>, AppError>;

    async fn count(&self, table: &RegisteredTable) -> Result<u64, AppError>;

    async fn fetch_by_key(&self, table: &RegisteredTable, key: &FieldValue) -> Result<Option<Record>, AppError>;

    /// Insert one row. Returns the generated key, if the store generated one.
    async fn insert(&self, table: &RegisteredTable, fields: &Record) -> Result<Option<FieldValue>, AppError>;

    /// Returns the number of rows affected.
    async fn update(&self, table: &RegisteredTable, key: &FieldValue, fields: &Record) -> Result<u64, AppError>;

    /// Returns the number of rows affected.
    async fn delete(&self, table: &RegisteredTable, key: &FieldValue) -> Result<u64, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}
