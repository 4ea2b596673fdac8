//! HTTP handlers for record CRUD and table metadata.

pub mod entity;
pub mod meta;
pub use entity::*;
pub use meta::*;
