//! Record CRUD and metadata routes for every registered table.
//! The table is a path parameter; handlers resolve it against the registry, so unregistered names are 404.

use crate::handlers::{create, delete as delete_handler, describe_table, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .route("/meta/:table", get(describe_table))
        .route("/:table", get(list).post(create))
        .route("/:table/:id", get(read).put(update).delete(delete_handler))
        .with_state(state)
}
