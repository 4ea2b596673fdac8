//! Generic record operations for one registered (table, primary key) pair.

use crate::config::RegisteredTable;
use crate::error::AppError;
use crate::response::{Ack, Page, Written};
use crate::schema::TableDescriptor;
use crate::service::PayloadValidator;
use crate::store::RecordStore;
use crate::value::{FieldValue, Record};

pub const DEFAULT_LIMIT: u64 = 50;
pub const MAX_LIMIT: u64 = 1000;

pub struct RecordService;

impl RecordService {
    /// One page plus the unfiltered row count. limit defaults to 50 (max 1000), offset to 0.
    /// Row order is whatever the store returns.
    pub async fn list(
        store: &dyn RecordStore,
        table: &RegisteredTable,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> Result<Page, AppError> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = offset.unwrap_or(0);
        let data = store.fetch_page(table, limit, offset).await?;
        let total = store.count(table).await?;
        Ok(Page { data, total })
    }

    pub async fn get_one(store: &dyn RecordStore, table: &RegisteredTable, id: &FieldValue) -> Result<Record, AppError> {
        store
            .fetch_by_key(table, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {}", table.name, id)))
    }

    /// Validate against the live schema, then insert and re-read the new row.
    pub async fn create(
        store: &dyn RecordStore,
        table: &RegisteredTable,
        schema: &TableDescriptor,
        body: Record,
    ) -> Result<Written, AppError> {
        PayloadValidator::require_non_empty(&body, "create")?;
        PayloadValidator::check_columns(&body, schema)?;
        let mut clean = PayloadValidator::sanitize(body);

        if schema
            .column(&table.primary_key)
            .map(|c| c.is_auto_generated)
            .unwrap_or(false)
        {
            clean.remove(&table.primary_key);
        }
        if clean.is_empty() {
            return Err(AppError::InvalidInput("no valid fields to insert".into()));
        }

        let generated = store.insert(table, &clean).await?;
        let new_id = generated.or_else(|| clean.get(&table.primary_key).filter(|v| !v.is_null()).cloned());
        let Some(new_id) = new_id else {
            return Ok(Written::Ack(Ack::ok()));
        };
        tracing::info!(table = %table.name, id = %new_id, "record created");
        Ok(match store.fetch_by_key(table, &new_id).await? {
            Some(row) => Written::Row(row),
            None => Written::Ack(Ack::with_id(new_id)),
        })
    }

    /// Sets every supplied field, then re-reads the row by the original id.
    /// Keys are checked against the same column allow-list as create.
    pub async fn update(
        store: &dyn RecordStore,
        table: &RegisteredTable,
        schema: &TableDescriptor,
        id: &FieldValue,
        body: Record,
    ) -> Result<Written, AppError> {
        PayloadValidator::require_non_empty(&body, "update")?;
        PayloadValidator::check_columns(&body, schema)?;
        store.update(table, id, &body).await?;
        Ok(match store.fetch_by_key(table, id).await? {
            Some(row) => Written::Row(row),
            None => Written::Ack(Ack::ok()),
        })
    }

    /// Unconditional delete; succeeds even when nothing matched.
    pub async fn delete(store: &dyn RecordStore, table: &RegisteredTable, id: &FieldValue) -> Result<Ack, AppError> {
        let affected = store.delete(table, id).await?;
        tracing::debug!(table = %table.name, id = %id, affected, "record deleted");
        Ok(Ack::ok())
    }
}
