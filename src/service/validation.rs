//! Payload validation against the introspected table schema.

use crate::config::is_valid_identifier;
use crate::error::AppError;
use crate::schema::TableDescriptor;
use crate::value::{FieldValue, Record};

pub struct PayloadValidator;

impl PayloadValidator {
    pub fn require_non_empty(body: &Record, what: &str) -> Result<(), AppError> {
        if body.is_empty() {
            return Err(AppError::InvalidInput(format!("{}: body is empty", what)));
        }
        Ok(())
    }

    /// Every key must be a column of the table. Fails with all offending keys and the allowed set;
    /// nothing is written when this fails.
    pub fn check_columns(body: &Record, schema: &TableDescriptor) -> Result<(), AppError> {
        let unknown: Vec<String> = body
            .keys()
            .filter(|k| schema.column(k).is_none() || !is_valid_identifier(k))
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(AppError::Unprocessable {
                table: schema.table_name.clone(),
                unknown,
                allowed: schema.column_names(),
            });
        }
        Ok(())
    }

    /// Empty strings become null.
    pub fn sanitize(body: Record) -> Record {
        body.into_iter()
            .map(|(k, v)| if v.is_empty_text() { (k, FieldValue::Null) } else { (k, v) })
            .collect()
    }
}
