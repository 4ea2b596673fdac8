//! Record CRUD handlers: list, read, create, update, delete.

use crate::config::RegisteredTable;
use crate::error::AppError;
use crate::extractors::RecordBody;
use crate::service::{PayloadValidator, RecordService, SchemaIntrospector};
use crate::state::AppState;
use crate::value::FieldValue;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::collections::HashMap;

fn registered<'a>(state: &'a AppState, table: &str) -> Result<&'a RegisteredTable, AppError> {
    state
        .registry
        .table(table)
        .ok_or_else(|| AppError::NotFound(format!("table {}", table)))
}

pub async fn list(
    State(state): State<AppState>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let table = registered(&state, &table)?;
    let limit = params.get("limit").and_then(|v| v.parse().ok());
    let offset = params.get("offset").and_then(|v| v.parse().ok());
    let page = RecordService::list(state.store.as_ref(), table, limit, offset).await?;
    Ok((StatusCode::OK, Json(page)))
}

pub async fn read(
    State(state): State<AppState>,
    Path((table, id_str)): Path<(String, String)>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let table = registered(&state, &table)?;
    let id = FieldValue::from_path_segment(&id_str);
    let row = RecordService::get_one(state.store.as_ref(), table, &id).await?;
    Ok((StatusCode::OK, Json(row)))
}

pub async fn create(
    State(state): State<AppState>,
    Path(table): Path<String>,
    RecordBody(body): RecordBody,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let table = registered(&state, &table)?;
    PayloadValidator::require_non_empty(&body, "create")?;
    let schema = SchemaIntrospector::describe(state.store.as_ref(), &state.registry, &table.name).await?;
    let written = RecordService::create(state.store.as_ref(), table, &schema, body).await?;
    Ok((StatusCode::CREATED, Json(written)))
}

pub async fn update(
    State(state): State<AppState>,
    Path((table, id_str)): Path<(String, String)>,
    RecordBody(body): RecordBody,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let table = registered(&state, &table)?;
    let id = FieldValue::from_path_segment(&id_str);
    PayloadValidator::require_non_empty(&body, "update")?;
    let schema = SchemaIntrospector::describe(state.store.as_ref(), &state.registry, &table.name).await?;
    let written = RecordService::update(state.store.as_ref(), table, &schema, &id, body).await?;
    Ok((StatusCode::OK, Json(written)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path((table, id_str)): Path<(String, String)>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let table = registered(&state, &table)?;
    let id = FieldValue::from_path_segment(&id_str);
    let ack = RecordService::delete(state.store.as_ref(), table, &id).await?;
    Ok((StatusCode::OK, Json(ack)))
}
