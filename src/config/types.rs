//! Raw config types as read from JSON.

use serde::{Deserialize, Serialize};

/// A table exposed through the generic record router. The primary key is configured,
/// not discovered: several tables use irregular key names.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TableConfig {
    pub name: String,
    pub primary_key: String,
}

/// A column whose stored value is the key of a row in another table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForeignKeyConfig {
    pub table: String,
    pub column: String,
    pub references_table: String,
    pub references_key: String,
    /// Columns of the referenced row joined into the display label.
    #[serde(default)]
    pub label_columns: Vec<String>,
}

/// All config types in one struct for in-memory loading.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConsoleConfig {
    pub tables: Vec<TableConfig>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyConfig>,
}
