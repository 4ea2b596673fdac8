//! Table and column descriptors produced by catalog introspection, plus input-kind inference.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    pub name: String,
    /// Raw backing-store type, e.g. "int(11)" or "varchar(255)".
    pub declared_type: String,
    pub nullable: bool,
    pub default_value: Option<String>,
    pub is_auto_generated: bool,
    /// Catalog key flag marks this column as the primary key.
    #[serde(default)]
    pub is_primary_key: bool,
}

impl ColumnDescriptor {
    pub fn input_kind(&self) -> InputKind {
        InputKind::infer(&self.declared_type)
    }

    /// NOT NULL without a default: a form must supply it.
    pub fn is_required(&self) -> bool {
        !self.nullable && self.default_value.is_none()
    }
}

/// Fresh on every introspection; never cached.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableDescriptor {
    #[serde(rename = "table")]
    pub table_name: String,
    pub columns: Vec<ColumnDescriptor>,
    #[serde(rename = "pk")]
    pub primary_key: Option<String>,
}

impl TableDescriptor {
    /// Primary key is the column the catalog flags; `None` when the table declares none.
    pub fn new(table_name: impl Into<String>, columns: Vec<ColumnDescriptor>) -> Self {
        let primary_key = columns.iter().find(|c| c.is_primary_key).map(|c| c.name.clone());
        TableDescriptor {
            table_name: table_name.into(),
            columns,
            primary_key,
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// Semantic input kind derived from a declared column type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Numeric,
    DateTime,
    Date,
    LongText,
    ShortText,
}

impl InputKind {
    /// Case-insensitive substring match. datetime/timestamp are checked before date.
    pub fn infer(declared_type: &str) -> Self {
        let t = declared_type.to_lowercase();
        if ["int", "decimal", "float", "double"].iter().any(|k| t.contains(k)) {
            InputKind::Numeric
        } else if t.contains("datetime") || t.contains("timestamp") {
            InputKind::DateTime
        } else if t.contains("date") {
            InputKind::Date
        } else if t.contains("text") {
            InputKind::LongText
        } else {
            InputKind::ShortText
        }
    }
}
