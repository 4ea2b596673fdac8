//! Shared application state for all routes. The registry is fixed at startup.

use crate::config::Registry;
use crate::store::RecordStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub registry: Arc<Registry>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, registry: Registry) -> Self {
        AppState {
            store,
            registry: Arc::new(registry),
        }
    }
}
