//! Resolved model: config validated and flattened for runtime use. Immutable once built.

use std::collections::HashMap;

/// A registered (table, primary key) pair. Only these names ever reach statement text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisteredTable {
    pub name: String,
    pub primary_key: String,
}

#[derive(Clone, Debug, Default)]
pub struct Registry {
    pub tables: Vec<RegisteredTable>,
    by_name: HashMap<String, usize>,
}

impl Registry {
    pub fn new(tables: Vec<RegisteredTable>) -> Self {
        let by_name = tables.iter().enumerate().map(|(i, t)| (t.name.clone(), i)).collect();
        Registry { tables, by_name }
    }

    pub fn table(&self, name: &str) -> Option<&RegisteredTable> {
        self.by_name.get(name).map(|&i| &self.tables[i])
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForeignKeyBinding {
    pub local_column: String,
    pub referenced_table: String,
    pub referenced_key: String,
    pub label_columns: Vec<String>,
}

/// Bindings keyed by dependent table, then by local column.
#[derive(Clone, Debug, Default)]
pub struct ForeignKeyBindings {
    by_table: HashMap<String, Vec<ForeignKeyBinding>>,
}

impl ForeignKeyBindings {
    pub fn new(entries: impl IntoIterator<Item = (String, ForeignKeyBinding)>) -> Self {
        let by_table = entries.into_iter().fold(HashMap::new(), |mut m: HashMap<_, Vec<_>>, (t, b)| {
            m.entry(t).or_default().push(b);
            m
        });
        ForeignKeyBindings { by_table }
    }

    pub fn for_table(&self, table: &str) -> &[ForeignKeyBinding] {
        self.by_table.get(table).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn get(&self, table: &str, column: &str) -> Option<&ForeignKeyBinding> {
        self.for_table(table).iter().find(|b| b.local_column == column)
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub registry: Registry,
    pub bindings: ForeignKeyBindings,
}
