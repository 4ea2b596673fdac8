//! Load config from a JSON file or the built-in catalogue, then resolve it.

use crate::config::resolved::{ForeignKeyBinding, ForeignKeyBindings, RegisteredTable, Registry, ResolvedConfig};
use crate::config::{library_catalogue, validate, ConsoleConfig};
use crate::error::ConfigError;
use std::path::Path;

/// Build the resolved model from config (validates first).
pub fn resolve(config: &ConsoleConfig) -> Result<ResolvedConfig, ConfigError> {
    validate(config)?;

    let registry = Registry::new(
        config
            .tables
            .iter()
            .map(|t| RegisteredTable {
                name: t.name.clone(),
                primary_key: t.primary_key.clone(),
            })
            .collect(),
    );
    let bindings = ForeignKeyBindings::new(config.foreign_keys.iter().map(|b| {
        (
            b.table.clone(),
            ForeignKeyBinding {
                local_column: b.column.clone(),
                referenced_table: b.references_table.clone(),
                referenced_key: b.references_key.clone(),
                label_columns: b.label_columns.clone(),
            },
        )
    }));

    Ok(ResolvedConfig { registry, bindings })
}

pub fn parse_config(json: &str) -> Result<ConsoleConfig, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::Load(e.to_string()))
}

pub async fn load_from_path(path: &Path) -> Result<ConsoleConfig, ConfigError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    parse_config(&raw)
}

/// Config file when a path is given, otherwise the built-in library catalogue.
pub async fn load(path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
    let config = match path {
        Some(p) => {
            tracing::info!(path = %p.display(), "loading console config");
            load_from_path(p).await?
        }
        None => library_catalogue(),
    };
    resolve(&config)
}
