//! JSON record body whose rejections use the API error envelope.

use crate::error::AppError;
use crate::value::{body_to_record, Record};
use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde_json::Value;

/// A request body parsed as a JSON object of scalars.
#[derive(Clone, Debug)]
pub struct RecordBody(pub Record);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

#[async_trait]
impl<S> FromRequest<S> for RecordBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;
        Ok(RecordBody(body_to_record(value)?))
    }
}
