//! Client view of the record API, and its HTTP implementation.

use crate::response::{Ack, MetaBody, Page, Written};
use crate::schema::TableDescriptor;
use crate::value::{FieldValue, Record};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Api { status: u16, message: String },
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("not allowed while {0}")]
    InvalidState(&'static str),
    #[error("no row at index {0}")]
    NoSuchRow(usize),
}

#[async_trait]
pub trait ConsoleApi: Send + Sync {
    async fn describe(&self, table: &str) -> Result<TableDescriptor, ConsoleError>;
    async fn list(&self, table: &str, limit: u64, offset: u64) -> Result<Page, ConsoleError>;
    async fn create(&self, table: &str, payload: &Record) -> Result<Written, ConsoleError>;
    async fn update(&self, table: &str, id: &FieldValue, payload: &Record) -> Result<Written, ConsoleError>;
    async fn delete(&self, table: &str, id: &FieldValue) -> Result<Ack, ConsoleError>;
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorFields,
}

#[derive(Deserialize)]
struct ErrorFields {
    message: String,
}

/// Talks to the server's `/api` surface.
#[derive(Clone)]
pub struct HttpConsoleApi {
    client: reqwest::Client,
    base: Url,
}

impl HttpConsoleApi {
    /// `base` is the API root, e.g. `http://localhost:4000/api`.
    pub fn new(base: &str) -> Result<Self, ConsoleError> {
        Self::with_client(reqwest::Client::new(), base)
    }

    pub fn with_client(client: reqwest::Client, base: &str) -> Result<Self, ConsoleError> {
        let base = Url::parse(base).map_err(|e| ConsoleError::InvalidUrl(format!("{}: {}", base, e)))?;
        if base.cannot_be_a_base() {
            return Err(ConsoleError::InvalidUrl(base.to_string()));
        }
        Ok(HttpConsoleApi { client, base })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ConsoleError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ConsoleError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ConsoleError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }
        let message = match resp.json::<ErrorEnvelope>().await {
            Ok(env) => env.error.message,
            Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
        };
        tracing::warn!(status = status.as_u16(), message = %message, "api error");
        Err(ConsoleError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ConsoleApi for HttpConsoleApi {
    async fn describe(&self, table: &str) -> Result<TableDescriptor, ConsoleError> {
        let resp = self.client.get(self.url(&["meta", table])?).send().await?;
        let meta: MetaBody = Self::decode(resp).await?;
        Ok(TableDescriptor {
            table_name: table.to_string(),
            columns: meta.columns,
            primary_key: meta.pk,
        })
    }

    async fn list(&self, table: &str, limit: u64, offset: u64) -> Result<Page, ConsoleError> {
        let resp = self
            .client
            .get(self.url(&[table])?)
            .query(&[("limit", limit), ("offset", offset)])
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn create(&self, table: &str, payload: &Record) -> Result<Written, ConsoleError> {
        let resp = self.client.post(self.url(&[table])?).json(payload).send().await?;
        Self::decode(resp).await
    }

    async fn update(&self, table: &str, id: &FieldValue, payload: &Record) -> Result<Written, ConsoleError> {
        let id = id.to_string();
        let resp = self.client.put(self.url(&[table, &id])?).json(payload).send().await?;
        Self::decode(resp).await
    }

    async fn delete(&self, table: &str, id: &FieldValue) -> Result<Ack, ConsoleError> {
        let id = id.to_string();
        let resp = self.client.delete(self.url(&[table, &id])?).send().await?;
        Self::decode(resp).await
    }
}

impl ConsoleError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ConsoleError::Api { status, .. } => StatusCode::from_u16(*status).ok(),
            ConsoleError::Http(e) => e.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::app;
    use crate::state::AppState;
    use crate::store::memory::{library_config, MemoryStore};
    use axum::http::HeaderValue;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    async fn serve() -> HttpConsoleApi {
        let state = AppState::new(Arc::new(MemoryStore::library()), library_config().registry);
        let router = app(state, HeaderValue::from_static("http://localhost:5173"));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        HttpConsoleApi::new(&format!("http://{}/api", addr)).unwrap()
    }

    #[test]
    fn builds_urls_under_base() {
        let api = HttpConsoleApi::new("http://localhost:4000/api/").unwrap();
        assert_eq!(api.url(&["meta", "libros"]).unwrap().as_str(), "http://localhost:4000/api/meta/libros");
        assert_eq!(api.url(&["libros", "a b"]).unwrap().as_str(), "http://localhost:4000/api/libros/a%20b");
        assert!(HttpConsoleApi::new("not a url").is_err());
    }

    #[tokio::test]
    async fn round_trips_over_http() {
        let api = serve().await;

        let d = api.describe("libros").await.unwrap();
        assert_eq!(d.primary_key.as_deref(), Some("id_libro"));
        assert_eq!(d.table_name, "libros");

        let mut payload = Record::new();
        payload.insert("titulo".into(), "Ficciones".into());
        payload.insert("id_editorial".into(), FieldValue::Int(1));
        let created = api.create("libros", &payload).await.unwrap();
        let id = created.row().unwrap()["id_libro"].clone();

        let page = api.list("libros", 10, 0).await.unwrap();
        assert_eq!(page.total, 2);
        assert!(page.data.iter().any(|r| r["titulo"] == FieldValue::Text("Ficciones".into())));

        assert_eq!(api.delete("libros", &id).await.unwrap(), Ack::ok());
    }

    #[tokio::test]
    async fn surfaces_error_envelope() {
        let api = serve().await;
        let mut payload = Record::new();
        payload.insert("isbn".into(), "978".into());
        let err = api.create("libros", &payload).await.unwrap_err();
        match err {
            ConsoleError::Api { status, message } => {
                assert_eq!(status, 422);
                assert!(message.contains("isbn"));
            }
            other => panic!("unexpected error {:?}", other),
        }
        let err = api.describe("nope").await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }
}
