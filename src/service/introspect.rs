//! Schema introspection for registered tables.

use crate::config::Registry;
use crate::error::AppError;
use crate::schema::TableDescriptor;
use crate::store::RecordStore;

pub struct SchemaIntrospector;

impl SchemaIntrospector {
    /// Describe a registered table from the live catalog. Unregistered names never reach the store.
    pub async fn describe(
        store: &dyn RecordStore,
        registry: &Registry,
        table: &str,
    ) -> Result<TableDescriptor, AppError> {
        let registered = registry
            .table(table)
            .ok_or_else(|| AppError::NotFound(format!("table {}", table)))?;
        let columns = store.columns(&registered.name).await?;
        if columns.is_empty() {
            return Err(AppError::NotFound(format!("table {} in catalog", table)));
        }
        Ok(TableDescriptor::new(registered.name.clone(), columns))
    }
}
