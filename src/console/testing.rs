//! In-process ConsoleApi over the record service and the in-memory store.

use crate::config::ForeignKeyBindings;
use crate::console::api::{ConsoleApi, ConsoleError};
use crate::error::AppError;
use crate::response::{Ack, Page, Written};
use crate::schema::TableDescriptor;
use crate::service::{RecordService, SchemaIntrospector};
use crate::state::AppState;
use crate::store::memory::{library_config, MemoryStore};
use crate::value::{FieldValue, Record};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

pub struct LocalApi {
    state: AppState,
    bindings: Arc<ForeignKeyBindings>,
    list_calls: AtomicUsize,
    fail_writes: AtomicBool,
}

fn to_console(e: AppError) -> ConsoleError {
    ConsoleError::Api {
        status: e.status().as_u16(),
        message: e.to_string(),
    }
}

impl LocalApi {
    pub fn library() -> Arc<Self> {
        let config = library_config();
        Arc::new(LocalApi {
            state: AppState::new(Arc::new(MemoryStore::library()), config.registry),
            bindings: Arc::new(config.bindings),
            list_calls: AtomicUsize::new(0),
            fail_writes: AtomicBool::new(false),
        })
    }

    pub fn bindings(&self) -> Arc<ForeignKeyBindings> {
        self.bindings.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writes(&self) -> Result<(), ConsoleError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ConsoleError::Api {
                status: 500,
                message: "database: connection reset".into(),
            });
        }
        Ok(())
    }

    async fn schema(&self, table: &str) -> Result<TableDescriptor, AppError> {
        SchemaIntrospector::describe(self.state.store.as_ref(), &self.state.registry, table).await
    }

    fn table(&self, table: &str) -> Result<crate::config::RegisteredTable, ConsoleError> {
        self.state
            .registry
            .table(table)
            .cloned()
            .ok_or_else(|| to_console(AppError::NotFound(table.to_string())))
    }
}

#[async_trait]
impl ConsoleApi for LocalApi {
    async fn describe(&self, table: &str) -> Result<TableDescriptor, ConsoleError> {
        self.schema(table).await.map_err(to_console)
    }

    async fn list(&self, table: &str, limit: u64, offset: u64) -> Result<Page, ConsoleError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let t = self.table(table)?;
        RecordService::list(self.state.store.as_ref(), &t, Some(limit), Some(offset))
            .await
            .map_err(to_console)
    }

    async fn create(&self, table: &str, payload: &Record) -> Result<Written, ConsoleError> {
        self.check_writes()?;
        let t = self.table(table)?;
        let schema = self.schema(table).await.map_err(to_console)?;
        RecordService::create(self.state.store.as_ref(), &t, &schema, payload.clone())
            .await
            .map_err(to_console)
    }

    async fn update(&self, table: &str, id: &FieldValue, payload: &Record) -> Result<Written, ConsoleError> {
        self.check_writes()?;
        let t = self.table(table)?;
        let schema = self.schema(table).await.map_err(to_console)?;
        RecordService::update(self.state.store.as_ref(), &t, &schema, id, payload.clone())
            .await
            .map_err(to_console)
    }

    async fn delete(&self, table: &str, id: &FieldValue) -> Result<Ack, ConsoleError> {
        self.check_writes()?;
        let t = self.table(table)?;
        RecordService::delete(self.state.store.as_ref(), &t, id).await.map_err(to_console)
    }
}
