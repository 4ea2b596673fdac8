//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for MySQL.
//!
//! Table and key names come from the registry and column names from the catalog;
//! callers check them against the identifier allow-list before building.

use crate::config::RegisteredTable;
use crate::value::{FieldValue, Record};

/// Quote identifier for MySQL.
fn quoted(s: &str) -> String {
    format!("`{}`", s.replace('`', "``"))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<FieldValue>,
}

impl QueryBuf {
    fn new(sql: String) -> Self {
        QueryBuf { sql, params: Vec::new() }
    }

    fn push_param(&mut self, v: FieldValue) {
        self.params.push(v);
    }
}

/// Columns of one table in the current database, in declaration order. Table name is a parameter.
pub fn describe_columns(table: &str) -> QueryBuf {
    let mut q = QueryBuf::new(
        "SELECT CAST(COLUMN_NAME AS CHAR) AS name, \
                CAST(COLUMN_TYPE AS CHAR) AS declared_type, \
                CAST(IS_NULLABLE AS CHAR) AS is_nullable, \
                CAST(COLUMN_DEFAULT AS CHAR) AS default_value, \
                CAST(COLUMN_KEY AS CHAR) AS column_key, \
                CAST(EXTRA AS CHAR) AS extra \
         FROM information_schema.COLUMNS \
         WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = ? \
         ORDER BY ORDINAL_POSITION"
            .to_string(),
    );
    q.push_param(FieldValue::Text(table.to_string()));
    q
}

/// One page of rows in backing-store order.
pub fn select_page(table: &RegisteredTable, limit: u64, offset: u64) -> QueryBuf {
    let mut q = QueryBuf::new(format!("SELECT * FROM {} LIMIT ? OFFSET ?", quoted(&table.name)));
    q.push_param(FieldValue::Int(limit as i64));
    q.push_param(FieldValue::Int(offset as i64));
    q
}

pub fn count(table: &RegisteredTable) -> QueryBuf {
    QueryBuf::new(format!("SELECT COUNT(*) AS total FROM {}", quoted(&table.name)))
}

pub fn select_by_key(table: &RegisteredTable, key: &FieldValue) -> QueryBuf {
    let mut q = QueryBuf::new(format!(
        "SELECT * FROM {} WHERE {} = ?",
        quoted(&table.name),
        quoted(&table.primary_key)
    ));
    q.push_param(key.clone());
    q
}

/// INSERT of exactly the given fields, in key order.
pub fn insert(table: &RegisteredTable, fields: &Record) -> QueryBuf {
    let mut q = QueryBuf::new(String::new());
    let mut cols = Vec::with_capacity(fields.len());
    for (name, v) in fields {
        cols.push(quoted(name));
        q.push_param(v.clone());
    }
    let placeholders = vec!["?"; cols.len()].join(", ");
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted(&table.name),
        cols.join(", "),
        placeholders
    );
    q
}

/// UPDATE by key: SET every supplied field.
pub fn update(table: &RegisteredTable, key: &FieldValue, fields: &Record) -> QueryBuf {
    let mut q = QueryBuf::new(String::new());
    let mut sets = Vec::with_capacity(fields.len());
    for (name, v) in fields {
        sets.push(format!("{} = ?", quoted(name)));
        q.push_param(v.clone());
    }
    q.push_param(key.clone());
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        quoted(&table.name),
        sets.join(", "),
        quoted(&table.primary_key)
    );
    q
}

pub fn delete(table: &RegisteredTable, key: &FieldValue) -> QueryBuf {
    let mut q = QueryBuf::new(format!(
        "DELETE FROM {} WHERE {} = ?",
        quoted(&table.name),
        quoted(&table.primary_key)
    ));
    q.push_param(key.clone());
    q
}
