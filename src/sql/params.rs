//! Bind field values to sqlx MySQL queries.

use crate::value::FieldValue;
use sqlx::mysql::{MySql, MySqlArguments};
use sqlx::query::Query;

pub type MySqlQuery<'q> = Query<'q, MySql, MySqlArguments>;

pub fn bind_value<'q>(query: MySqlQuery<'q>, v: &FieldValue) -> MySqlQuery<'q> {
    match v {
        FieldValue::Null => query.bind(None::<String>),
        FieldValue::Bool(b) => query.bind(*b),
        FieldValue::Int(n) => query.bind(*n),
        FieldValue::Float(n) => query.bind(*n),
        FieldValue::Text(s) => query.bind(s.clone()),
    }
}

pub fn bind_all<'q>(sql: &'q str, params: &[FieldValue]) -> MySqlQuery<'q> {
    params.iter().fold(sqlx::query(sql), bind_value)
}
