//! Config validation: identifier allow-list and referential integrity.

use crate::config::ConsoleConfig;
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Path segment taken by the metadata endpoint.
pub const RESERVED_TABLE_NAMES: &[&str] = &["meta"];

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,63}$").expect("static identifier pattern"))
}

/// True for names safe to interpolate (quoted) into statement text.
pub fn is_valid_identifier(s: &str) -> bool {
    identifier_re().is_match(s)
}

pub fn check_identifier(s: &str) -> Result<(), ConfigError> {
    if is_valid_identifier(s) {
        Ok(())
    } else {
        Err(ConfigError::InvalidIdentifier(s.to_string()))
    }
}

pub fn validate(config: &ConsoleConfig) -> Result<(), ConfigError> {
    let mut tables = HashSet::new();
    for t in &config.tables {
        check_identifier(&t.name)?;
        check_identifier(&t.primary_key)?;
        if RESERVED_TABLE_NAMES.contains(&t.name.as_str()) {
            return Err(ConfigError::ReservedName(t.name.clone()));
        }
        if !tables.insert(t.name.as_str()) {
            return Err(ConfigError::DuplicateTable(t.name.clone()));
        }
    }

    let mut bound = HashSet::new();
    for b in &config.foreign_keys {
        check_identifier(&b.column)?;
        check_identifier(&b.references_key)?;
        for label in &b.label_columns {
            check_identifier(label)?;
        }
        for table in [&b.table, &b.references_table] {
            if !tables.contains(table.as_str()) {
                return Err(ConfigError::MissingReference {
                    kind: "table",
                    id: table.clone(),
                });
            }
        }
        if !bound.insert((b.table.as_str(), b.column.as_str())) {
            return Err(ConfigError::DuplicateBinding {
                table: b.table.clone(),
                column: b.column.clone(),
            });
        }
    }

    Ok(())
}
