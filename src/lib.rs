//! Library console: generic record API over a fixed set of MySQL tables, plus the client engine that drives it.

pub mod config;
pub mod console;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod schema;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;
pub mod value;

pub use config::{load as load_config, resolve, ConsoleConfig, ResolvedConfig, Settings};
pub use error::{AppError, ConfigError};
pub use response::{Ack, MetaBody, Page, Written};
pub use routes::{app, common_routes, entity_routes};
pub use schema::{ColumnDescriptor, InputKind, TableDescriptor};
pub use service::{RecordService, SchemaIntrospector};
pub use state::AppState;
pub use store::{MySqlStore, RecordStore};
pub use value::{FieldValue, Record};
