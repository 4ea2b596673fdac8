//! Table metadata handler.

use crate::error::AppError;
use crate::response::MetaBody;
use crate::service::SchemaIntrospector;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

pub async fn describe_table(
    State(state): State<AppState>,
    Path(table): Path<String>,
) -> Result<Json<MetaBody>, AppError> {
    let descriptor = SchemaIntrospector::describe(state.store.as_ref(), &state.registry, &table).await?;
    Ok(Json(descriptor.into()))
}
