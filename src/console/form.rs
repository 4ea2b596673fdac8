//! Form and grid models built from a table descriptor and resolved options.

use crate::config::ForeignKeyBinding;
use crate::console::fk::{lookup_label, OptionEntry, OptionSets};
use crate::schema::{InputKind, TableDescriptor};
use crate::value::{FieldValue, Record};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq)]
pub enum Control {
    Input(InputKind),
    /// Options may be empty while resolution is still in flight.
    Select(Vec<OptionEntry>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub control: Control,
    pub required: bool,
}

/// Work-in-progress values keyed by column.
pub type Draft = BTreeMap<String, FieldValue>;

/// `id_editorial` -> `EDITORIAL`, `id_tipo_doc` -> `TIPO DOC`.
pub fn select_label(column: &str) -> String {
    column
        .strip_prefix("id_")
        .unwrap_or(column)
        .replace('_', " ")
        .to_uppercase()
}

/// One field per non-key column. A bound column is always a select, whatever its declared type.
pub fn form_fields(descriptor: &TableDescriptor, bindings: &[ForeignKeyBinding], options: &OptionSets) -> Vec<FormField> {
    descriptor
        .columns
        .iter()
        .filter(|c| descriptor.primary_key.as_deref() != Some(c.name.as_str()))
        .map(|c| {
            let bound = bindings.iter().any(|b| b.local_column == c.name);
            let (label, control) = if bound {
                (
                    select_label(&c.name),
                    Control::Select(options.get(&c.name).cloned().unwrap_or_default()),
                )
            } else {
                (c.name.clone(), Control::Input(c.input_kind()))
            };
            FormField {
                name: c.name.clone(),
                label,
                control,
                required: c.is_required(),
            }
        })
        .collect()
}

/// Bound columns show their option label when one matches; everything else its plain text.
pub fn display_cell(column: &str, value: &FieldValue, options: &OptionSets) -> String {
    options
        .get(column)
        .and_then(|opts| lookup_label(opts, value))
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}

#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total: u64,
}

impl Grid {
    pub fn caption(&self, table: &str) -> String {
        format!("{} ({} records)", table, self.total)
    }
}

pub fn grid(descriptor: &TableDescriptor, records: &[Record], options: &OptionSets, total: u64) -> Grid {
    let columns = descriptor.column_names();
    let rows = records
        .iter()
        .map(|r| {
            columns
                .iter()
                .map(|c| display_cell(c, r.get(c).unwrap_or(&FieldValue::Null), options))
                .collect()
        })
        .collect();
    Grid { columns, rows, total }
}

/// Pre-populate a draft from a row. Bound values become strings to match select values.
pub fn draft_from_row(row: &Record, bindings: &[ForeignKeyBinding]) -> Draft {
    row.iter()
        .map(|(k, v)| {
            let bound = bindings.iter().any(|b| &b.local_column == k);
            let v = if bound && !v.is_null() {
                FieldValue::Text(v.to_string())
            } else {
                v.clone()
            };
            (k.clone(), v)
        })
        .collect()
}

/// Only the form's fields are sent, with empty strings as null.
pub fn submission_payload(draft: &Draft, fields: &[FormField]) -> Record {
    fields
        .iter()
        .filter_map(|f| draft.get(&f.name).map(|v| (f.name.clone(), v.clone())))
        .map(|(k, v)| if v.is_empty_text() { (k, FieldValue::Null) } else { (k, v) })
        .collect()
}
