//! Router assembly.

mod common;
mod entity;

pub use common::common_routes;
pub use entity::entity_routes;

use crate::state::AppState;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;

pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Full application: common routes at the root, records and metadata under `/api`.
pub fn app(state: AppState, cors_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api", entity_routes(state))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(cors)
}
