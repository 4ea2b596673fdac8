//! Foreign-key option resolution: referenced rows turned into value/label pairs.

use crate::config::{ForeignKeyBinding, ForeignKeyBindings};
use crate::console::api::{ConsoleApi, ConsoleError};
use crate::value::{FieldValue, Record};
use std::collections::HashMap;
use std::sync::Arc;

/// Rows fetched per referenced table. Larger tables yield a truncated option list.
pub const OPTION_FETCH_LIMIT: u64 = 1000;

#[derive(Clone, Debug, PartialEq)]
pub struct OptionEntry {
    pub value: FieldValue,
    pub label: String,
    pub raw: Record,
}

/// Options per local column of the active table.
pub type OptionSets = HashMap<String, Vec<OptionEntry>>;

/// Label columns joined with a space, skipping null and empty values.
/// Without label columns the referenced key itself is the label.
pub fn build_label(row: &Record, binding: &ForeignKeyBinding) -> String {
    if binding.label_columns.is_empty() {
        return row.get(&binding.referenced_key).map(|v| v.to_string()).unwrap_or_default();
    }
    binding
        .label_columns
        .iter()
        .filter_map(|c| row.get(c))
        .filter(|v| !v.is_null() && !v.is_empty_text())
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Options are matched on their string form, the way select inputs compare values.
pub fn lookup_label<'a>(options: &'a [OptionEntry], value: &FieldValue) -> Option<&'a str> {
    options
        .iter()
        .find(|o| o.value.loosely_eq(value))
        .map(|o| o.label.as_str())
}

#[derive(Clone)]
pub struct ForeignKeyResolver {
    api: Arc<dyn ConsoleApi>,
    bindings: Arc<ForeignKeyBindings>,
}

impl ForeignKeyResolver {
    pub fn new(api: Arc<dyn ConsoleApi>, bindings: Arc<ForeignKeyBindings>) -> Self {
        ForeignKeyResolver { api, bindings }
    }

    pub fn bindings(&self) -> &ForeignKeyBindings {
        &self.bindings
    }

    /// Fetch every referenced table bound from `table` and build its option list. Runs in full on each call.
    pub async fn resolve(&self, table: &str) -> Result<OptionSets, ConsoleError> {
        let mut sets = OptionSets::new();
        for binding in self.bindings.for_table(table) {
            let page = self.api.list(&binding.referenced_table, OPTION_FETCH_LIMIT, 0).await?;
            if page.total > page.data.len() as u64 {
                tracing::warn!(
                    table = %binding.referenced_table,
                    total = page.total,
                    fetched = page.data.len(),
                    "option list truncated"
                );
            }
            let options = page
                .data
                .into_iter()
                .filter_map(|row| {
                    let value = row.get(&binding.referenced_key).filter(|v| !v.is_null())?.clone();
                    Some(OptionEntry {
                        label: build_label(&row, binding),
                        value,
                        raw: row,
                    })
                })
                .collect();
            sets.insert(binding.local_column.clone(), options);
        }
        Ok(sets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::testing::LocalApi;

    fn binding(labels: &[&str]) -> ForeignKeyBinding {
        ForeignKeyBinding {
            local_column: "id_usuario".into(),
            referenced_table: "usuarios".into(),
            referenced_key: "id_usuarios".into(),
            label_columns: labels.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn row(pairs: &[(&str, FieldValue)]) -> Record {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn labels_join_non_empty_fields() {
        let b = binding(&["a", "b"]);
        assert_eq!(build_label(&row(&[("a", "John".into()), ("b", "Doe".into())]), &b), "John Doe");
        assert_eq!(build_label(&row(&[("a", "John".into()), ("b", FieldValue::Null)]), &b), "John");
        assert_eq!(build_label(&row(&[("a", "".into()), ("b", "Doe".into())]), &b), "Doe");
        assert_eq!(build_label(&row(&[("a", FieldValue::Int(0))]), &b), "0");
    }

    #[test]
    fn label_falls_back_to_key() {
        let b = binding(&[]);
        assert_eq!(build_label(&row(&[("id_usuarios", FieldValue::Int(7))]), &b), "7");
        assert_eq!(build_label(&row(&[]), &b), "");
    }

    #[tokio::test]
    async fn resolves_bindings_of_active_table() {
        let api = LocalApi::library();
        let resolver = ForeignKeyResolver::new(api.clone(), api.bindings());

        let sets = resolver.resolve("prestamo").await.unwrap();
        assert_eq!(sets.len(), 2);
        let usuarios = &sets["id_usuarios"];
        assert_eq!(lookup_label(usuarios, &FieldValue::Int(1)), Some("John Doe"));
        assert_eq!(lookup_label(usuarios, &FieldValue::Text("2".into())), Some("Ana"));
        assert_eq!(lookup_label(usuarios, &FieldValue::Int(99)), None);
        assert_eq!(lookup_label(&sets["id_biblio"], &FieldValue::Int(1)), Some("Rosa Paz"));

        assert!(resolver.resolve("editorial").await.unwrap().is_empty());
        assert_eq!(api.list_calls(), 2);
    }
}
