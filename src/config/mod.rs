//! Table catalogue and settings: config types, validation, resolution and loading.

pub mod types;
pub mod library;
pub mod loader;
pub mod validator;
pub mod resolved;
pub mod settings;

pub use types::*;
pub use library::library_catalogue;
pub use loader::*;
pub use validator::*;
pub use resolved::*;
pub use settings::Settings;
